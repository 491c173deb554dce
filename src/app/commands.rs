//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::render::{ConsoleLevel, ConsoleLine};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        let mut panel = self.active_panel.next();
        while !self.is_visible(panel) {
            panel = panel.next();
        }
        self.focus(panel);
    }

    pub fn prev_panel(&mut self) {
        let mut panel = self.active_panel.prev();
        while !self.is_visible(panel) {
            panel = panel.prev();
        }
        self.focus(panel);
    }

    pub fn focus_saved(&mut self) {
        self.focus(Panel::Saved);
    }

    fn focus(&mut self, panel: Panel) {
        self.active_panel = panel;
        if panel.is_editable() {
            self.cursor_position = self.current_input().len();
        } else {
            self.input_mode = InputMode::Normal;
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel.is_editable() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        let cursor_pos = self.cursor_position;
        if cursor_pos == 0 {
            return;
        }
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        self.request.method = self.request.method.next();
        if !self.is_visible(self.active_panel) {
            self.focus(Panel::Url);
        }
    }

    // ========================
    // Response scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Saved requests
    // ========================

    pub fn next_saved(&mut self) {
        if !self.saved.is_empty() {
            self.selected_saved = (self.selected_saved + 1) % self.saved.len();
        }
    }

    pub fn prev_saved(&mut self) {
        if !self.saved.is_empty() {
            self.selected_saved = self
                .selected_saved
                .checked_sub(1)
                .unwrap_or(self.saved.len() - 1);
        }
    }

    /// Copy the selected saved request into the editor.
    ///
    /// Any request still in flight is abandoned so its result cannot
    /// overwrite the loaded response.
    pub fn load_selected(&mut self) -> Option<NetworkCommand> {
        let saved = self.saved.get(self.selected_saved)?.clone();
        let cancel = self.abandon_pending();

        tracing::info!(name = %saved.name, "Loading saved request");
        self.console = ConsoleLine::new(
            ConsoleLevel::Success,
            format!("Loaded request '{}'", saved.name),
        );
        self.request = saved;
        self.status = None;
        self.time_ms = 0;
        self.response_scroll = 0;
        if !self.is_visible(self.active_panel) {
            self.active_panel = Panel::Url;
        }
        self.cursor_position = self.current_input().len();
        cancel
    }

    // ========================
    // Save dialog
    // ========================

    pub fn open_save_dialog(&mut self) {
        self.show_save_dialog = true;
        self.input_mode = InputMode::Normal;
        self.save_name = self.request.name.clone();
    }

    pub fn save_name_char(&mut self, c: char) {
        self.save_name.push(c);
    }

    pub fn save_name_backspace(&mut self) {
        self.save_name.pop();
    }

    pub fn cancel_save(&mut self) {
        self.show_save_dialog = false;
        self.save_name.clear();
    }

    /// Add the editor contents under the dialog's name and persist the store
    pub fn confirm_save(&mut self) {
        self.show_save_dialog = false;
        self.request.name = std::mem::take(&mut self.save_name);

        let name = self.request.name.clone();
        self.store.add(self.request.clone());
        self.console = match self.store.save() {
            Ok(()) => ConsoleLine::new(ConsoleLevel::Info, format!("Saved request: {}", name)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save request");
                ConsoleLine::new(ConsoleLevel::Error, format!("Failed to save request: {}", e))
            }
        };
        self.saved = self.store.list();
        self.selected_saved = self.saved.len().saturating_sub(1);
    }

    // ========================
    // HTTP Request
    // ========================

    /// Commands for sending the editor's request, cancelling any pending one first
    pub fn prepare_request(&mut self) -> Vec<NetworkCommand> {
        let mut commands: Vec<NetworkCommand> = self.abandon_pending().into_iter().collect();

        let id = self.next_id();
        self.pending_request_id = Some(id);
        self.is_loading = true;
        self.console = ConsoleLine::new(
            ConsoleLevel::Info,
            format!("Sending {} {}", self.request.method, self.request.url.trim()),
        );

        commands.push(NetworkCommand::ExecuteRequest {
            id,
            method: self.request.method,
            url: self.request.url.clone(),
            body: self.request.body.clone(),
        });
        commands
    }

    /// Cancel the current pending request
    pub fn cancel_request(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.map(NetworkCommand::CancelRequest)
    }

    fn abandon_pending(&mut self) -> Option<NetworkCommand> {
        let id = self.pending_request_id.take()?;
        self.is_loading = false;
        Some(NetworkCommand::CancelRequest(id))
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Only the pending request may touch the editor
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Discarding stale response");
            return;
        }
        self.pending_request_id = None;
        self.is_loading = false;
        self.response_scroll = 0;

        match response {
            NetworkResponse::Success { status, display, format_warning, time_ms, .. } => {
                self.console = match format_warning {
                    Some(warning) => ConsoleLine::new(
                        ConsoleLevel::Warning,
                        format!("Response shown unformatted ({}): {}", status, warning),
                    ),
                    None => ConsoleLine::new(
                        ConsoleLevel::Success,
                        format!("Request successful ({})", status),
                    ),
                };
                self.request.response = display;
                self.status = Some(status);
                self.time_ms = time_ms;
                self.focus(Panel::Response);
            }
            NetworkResponse::Error { message, validation, .. } => {
                let text = if validation {
                    format!("Request not sent: {}", message)
                } else {
                    message
                };
                self.console = ConsoleLine::new(ConsoleLevel::Error, text);
                self.request.response.clear();
                self.status = None;
                self.time_ms = 0;
            }
            NetworkResponse::Cancelled { .. } => {
                self.console = ConsoleLine::new(ConsoleLevel::Info, "Request cancelled");
            }
        }
    }
}
