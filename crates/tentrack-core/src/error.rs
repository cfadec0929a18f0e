//! Error types for tentrack core.

use thiserror::Error;

/// Result type alias using the tentrack core `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for tent record handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Inspection date that is neither `YYYY-MM-DD` nor an RFC 3339 timestamp
    #[error("Invalid inspection date: {0:?}")]
    InvalidDate(String),

    /// Capacity that is negative, non-finite or not a number
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(String),
}
