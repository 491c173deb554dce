//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Panel};
use crate::models::HttpMethod;

/// Severity of the console line, mapped to a color by the UI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConsoleLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// One-line status message shown under the response
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub text: String,
}

impl ConsoleLine {
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        ConsoleLine {
            level,
            text: text.into(),
        }
    }
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Request editor
    pub method: HttpMethod,
    pub url: String,
    pub body: String,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Response
    /// Annotated text, `[#rrggbb]...[-]` with doubled literal brackets
    pub response: String,
    /// Status line of the last exchange, such as `200 OK`
    pub status: Option<String>,
    pub time_ms: u64,
    pub response_scroll: u16,
    pub is_loading: bool,
    pub console: ConsoleLine,

    // Saved requests
    pub saved_names: Vec<String>,
    pub selected_saved: usize,

    // Save dialog
    pub show_save_dialog: bool,
    pub save_name: String,
}
