//! Error types for session storage.

use thiserror::Error;

/// Errors raised while loading or persisting a session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored session could not be encoded or decoded
    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Session provider is unavailable
    #[error("Session provider unavailable: {0}")]
    Unavailable(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
