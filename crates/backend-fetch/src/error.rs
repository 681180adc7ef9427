//! Error types for backend fetches.

use session_store::SessionError;
use thiserror::Error;

/// Every way a backend fetch can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No valid session. Nothing was sent.
    #[error("No valid session")]
    NoSession,

    /// The request never got a response (connect, TLS, or body read failure).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Backend error: {status} - {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status line.
        message: String,
    },

    /// A success response whose body is not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request could not be built (empty path, bad body, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The session provider itself failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl FetchError {
    /// HTTP status for backend failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for backend fetches.
pub type FetchResult<T> = Result<T, FetchError>;
