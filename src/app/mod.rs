//! App layer - editor state, saved requests and command processing
//!
//! The App actor receives UI events and network responses, updates state,
//! and emits network commands and render snapshots. Saving and loading go
//! through the request repository it is given at construction.

pub mod state;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
