//! App actor - message loop processing UI events and network responses

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::storage::RequestRepository;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        store: Arc<dyn RequestRepository>,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(store),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, command: NetworkCommand) {
        let _ = self.network_tx.send(command);
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::FocusSaved => self.state.focus_saved(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Request actions
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::SendRequest => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                for cmd in self.state.prepare_request() {
                    self.send(cmd);
                }
            }
            UiEvent::CancelRequest => {
                if let Some(cmd) = self.state.cancel_request() {
                    self.send(cmd);
                }
            }

            // Saved requests
            UiEvent::NextSaved => self.state.next_saved(),
            UiEvent::PrevSaved => self.state.prev_saved(),
            UiEvent::LoadSaved => {
                if let Some(cmd) = self.state.load_selected() {
                    self.send(cmd);
                }
            }
            UiEvent::OpenSaveDialog => self.state.open_save_dialog(),
            UiEvent::SaveNameChar(c) => self.state.save_name_char(c),
            UiEvent::SaveNameBackspace => self.state.save_name_backspace(),
            UiEvent::ConfirmSave => self.state.confirm_save(),
            UiEvent::CancelSave => self.state.cancel_save(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RequestStore;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_send_then_quit() {
        let dir = tempdir().unwrap();
        let store = Arc::new(RequestStore::open(dir.path().join("requests.json")).unwrap());

        let (network_tx, mut network_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (_net_tx, net_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(store, network_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_rx));

        ui_tx.send(UiEvent::StartEditing).unwrap();
        for c in "http://localhost/".chars() {
            ui_tx.send(UiEvent::CharInput(c)).unwrap();
        }
        ui_tx.send(UiEvent::SendRequest).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        match network_rx.recv().await.unwrap() {
            NetworkCommand::ExecuteRequest { id, url, .. } => {
                assert_eq!(id, 1);
                assert_eq!(url, "http://localhost/");
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(matches!(network_rx.recv().await.unwrap(), NetworkCommand::Shutdown));

        let mut last = None;
        while let Ok(state) = render_rx.try_recv() {
            last = Some(state);
        }
        let last = last.unwrap();
        assert!(last.is_loading);
        assert_eq!(last.url, "http://localhost/");
    }
}
