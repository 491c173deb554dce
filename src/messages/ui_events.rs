//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    FocusSaved,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // HTTP Request actions
    SendRequest,
    CancelRequest,
    CycleMethod,

    // Saved requests
    NextSaved,
    PrevSaved,
    LoadSaved,
    OpenSaveDialog,
    SaveNameChar(char),
    SaveNameBackspace,
    ConfirmSave,
    CancelSave,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    Method,
    #[default]
    Url,
    Body,
    Response,
    Saved,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Method => Panel::Url,
            Panel::Url => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::Saved,
            Panel::Saved => Panel::Method,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Method => Panel::Saved,
            Panel::Url => Panel::Method,
            Panel::Body => Panel::Url,
            Panel::Response => Panel::Body,
            Panel::Saved => Panel::Response,
        }
    }

    /// Whether the panel holds editable text
    pub fn is_editable(&self) -> bool {
        matches!(self, Panel::Url | Panel::Body)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_save_dialog: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('x') => Some(UiEvent::CancelRequest),
            KeyCode::Char('s') if !show_save_dialog => Some(UiEvent::OpenSaveDialog),
            KeyCode::Char('a') if !show_save_dialog => Some(UiEvent::FocusSaved),
            KeyCode::Char('t') if !show_save_dialog => Some(UiEvent::CycleMethod),
            _ => None,
        };
    }

    if show_save_dialog {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelSave),
            KeyCode::Enter => Some(UiEvent::ConfirmSave),
            KeyCode::Backspace => Some(UiEvent::SaveNameBackspace),
            KeyCode::Char(c) => Some(UiEvent::SaveNameChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') if active_panel.is_editable() => Some(UiEvent::StartEditing),
            KeyCode::Enter => match active_panel {
                Panel::Method => Some(UiEvent::CycleMethod),
                Panel::Url | Panel::Body => Some(UiEvent::SendRequest),
                Panel::Saved => Some(UiEvent::LoadSaved),
                Panel::Response => None,
            },
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Up => match active_panel {
                Panel::Response => Some(UiEvent::ScrollUp),
                Panel::Saved => Some(UiEvent::PrevSaved),
                _ => None,
            },
            KeyCode::Down => match active_panel {
                Panel::Response => Some(UiEvent::ScrollDown),
                Panel::Saved => Some(UiEvent::NextSaved),
                _ => None,
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Enter => Some(UiEvent::SendRequest),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_enter_sends_while_editing() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Body, InputMode::Editing, false);
        assert_eq!(event, Some(UiEvent::SendRequest));
    }

    #[test]
    fn test_enter_on_method_cycles() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Method, InputMode::Normal, false);
        assert_eq!(event, Some(UiEvent::CycleMethod));
    }

    #[test]
    fn test_panel_cycle_wraps() {
        assert_eq!(Panel::Saved.next(), Panel::Method);
        assert_eq!(Panel::Method.prev(), Panel::Saved);
    }

    #[test]
    fn test_enter_loads_saved_request() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Saved, InputMode::Normal, false);
        assert_eq!(event, Some(UiEvent::LoadSaved));
    }

    #[test]
    fn test_save_dialog_captures_text() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Url, InputMode::Normal, true);
        assert_eq!(event, Some(UiEvent::SaveNameChar('q')));
        let event = key_to_ui_event(ctrl('s'), Panel::Url, InputMode::Normal, true);
        assert_eq!(event, None);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(
            key_to_ui_event(ctrl('s'), Panel::Url, InputMode::Editing, false),
            Some(UiEvent::OpenSaveDialog)
        );
        assert_eq!(
            key_to_ui_event(ctrl('a'), Panel::Url, InputMode::Normal, false),
            Some(UiEvent::FocusSaved)
        );
        assert_eq!(
            key_to_ui_event(ctrl('c'), Panel::Url, InputMode::Editing, true),
            Some(UiEvent::Quit)
        );
    }
}
