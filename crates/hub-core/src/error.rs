//! Error Types

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// User store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Unknown user id
    #[error("User not found: {0}")]
    UserNotFound(i64),
}
