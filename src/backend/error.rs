//! Backend error types

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Backend could not be reached at all
    #[error("Backend unavailable: {0}")]
    Connection(String),

    #[error("Request timeout")]
    Timeout,

    /// Backend was reached but rejected the operation
    #[error("Query failed ({status}): {message}")]
    Query { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl BackendError {
    /// Whether the failure means the backend was never reached
    pub fn is_connection(&self) -> bool {
        matches!(self, BackendError::Connection(_) | BackendError::Timeout)
    }

    /// Map a transport error the same way for every request
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BackendError::Timeout
        } else if err.is_connect() {
            BackendError::Connection(err.to_string())
        } else {
            BackendError::Request(err)
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
