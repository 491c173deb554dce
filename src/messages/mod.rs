//! Messages exchanged between the UI, App and Network actors.
//!
//! UI events flow to the App, commands flow from the App to the Network
//! actor, responses flow back, and render snapshots flow to the UI loop.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::UiEvent;
pub use network::{NetworkCommand, NetworkResponse};
pub use render::{ConsoleLevel, ConsoleLine, RenderState};
