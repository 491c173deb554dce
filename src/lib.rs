//! # reqterm
//!
//! A small terminal HTTP client: send GET/POST requests, view the response
//! pretty-printed and syntax-highlighted, and keep named requests on disk.
//!
//! ## Features
//! - GET and POST, with a JSON body for POST
//! - Response highlighting for JSON, XML and HTML, chosen by `Content-Type`
//! - Saved requests in a JSON file (`~/.reqterm/requests.json` by default)
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod highlight;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::AppConfig;
pub use error::{ExecuteError, FormatError, StoreError};
pub use highlight::{format_response, ResponseFormatter, TokenColorEmitter};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{HttpMethod, RawResponse, Request};
pub use network::{ClientConfig, NetworkActor, RequestExecutor};
pub use storage::{RequestRepository, RequestStore};
