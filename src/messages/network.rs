//! Network messages - communication between App and Network layers

use crate::models::HttpMethod;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute and format a request
    ExecuteRequest {
        id: u64,
        method: HttpMethod,
        url: String,
        body: String,
    },
    /// Cancel a pending request
    CancelRequest(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Response received; `display` is annotated text
    Success {
        id: u64,
        status: String,
        display: String,
        /// Set when the body could not be formatted and `display` is the raw body
        format_warning: Option<String>,
        time_ms: u64,
    },
    /// Request failed before or during the exchange
    Error {
        id: u64,
        message: String,
        /// True when rejected locally before any network activity
        validation: bool,
    },
    /// Request was cancelled
    Cancelled { id: u64 },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
