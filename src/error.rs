//! Error types for the executor, formatter and store

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single request execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Invalid JSON in request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Error creating request: {0}")]
    RequestConstruction(String),

    #[error("Error performing request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error reading response: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl ExecuteError {
    /// True for failures detected before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExecuteError::EmptyUrl
                | ExecuteError::UnsupportedMethod(_)
                | ExecuteError::InvalidBody(_)
                | ExecuteError::RequestConstruction(_)
        )
    }
}

/// Failure to turn a response body into annotated text
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("response declared as JSON is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
}

/// Failure of the saved-request store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse saved requests in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize saved requests for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
