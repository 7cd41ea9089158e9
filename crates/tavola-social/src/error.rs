//! Error types for social operations.
//!
//! None of these are fatal: the synchronizer maps every error to a
//! user-visible notice and leaves prior state intact. There is no retry
//! policy; a failed operation is re-run by the next user action.

use thiserror::Error;

/// Result type for social operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in social operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Store read or write failed
    #[error("Store error: {0}")]
    Store(#[from] tavola_store::Error),

    /// Profile storage failed
    #[error("Profile error: {0}")]
    Profile(#[from] tavola_profile::Error),

    /// Input rejected before any store call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A stored document is missing required fields
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}
