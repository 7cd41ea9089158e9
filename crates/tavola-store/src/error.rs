//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the document store.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection-level failure (DNS, refused, timeout, broken body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("Store returned status {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, if any.
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
