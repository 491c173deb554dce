//! App state - pure data structure with no I/O logic

use std::sync::Arc;

use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{ConsoleLine, RenderState};
use crate::models::Request;
use crate::storage::RequestRepository;

/// Main application state
///
/// The only side effect reachable from here is the saved-request repository,
/// which the save and load commands go through.
pub struct AppState {
    // Request editor; `request.response` holds the annotated response text
    pub request: Request,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Response
    pub status: Option<String>,
    pub time_ms: u64,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,
    pub console: ConsoleLine,

    // Saved requests
    pub store: Arc<dyn RequestRepository>,
    pub saved: Vec<Request>,
    pub selected_saved: usize,

    // Save dialog
    pub show_save_dialog: bool,
    pub save_name: String,
}

impl AppState {
    pub fn new(store: Arc<dyn RequestRepository>) -> Self {
        let saved = store.list();
        AppState {
            request: Request::default(),
            cursor_position: 0,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            status: None,
            time_ms: 0,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            console: ConsoleLine::default(),
            store,
            saved,
            selected_saved: 0,
            show_save_dialog: false,
            save_name: String::new(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Whether a panel is currently shown; the body only exists for POST
    pub fn is_visible(&self, panel: Panel) -> bool {
        panel != Panel::Body || self.request.method.has_body()
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.request.url,
            Panel::Body => &self.request.body,
            _ => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.request.url),
            Panel::Body => Some(&mut self.request.body),
            _ => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.request.method,
            url: self.request.url.clone(),
            body: self.request.body.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            response: self.request.response.clone(),
            status: self.status.clone(),
            time_ms: self.time_ms,
            response_scroll: self.response_scroll,
            is_loading: self.is_loading,
            console: self.console.clone(),
            saved_names: self.saved.iter().map(|r| r.name.clone()).collect(),
            selected_saved: self.selected_saved,
            show_save_dialog: self.show_save_dialog,
            save_name: self.save_name.clone(),
        }
    }
}
