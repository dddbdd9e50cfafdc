//! Error Types

use thiserror::Error;

/// Result type alias for notification operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Notification delivery errors
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The email provider rejected or failed the send
    #[error("Email delivery failed: {0}")]
    Delivery(String),

    /// Provider credentials missing or malformed
    #[error("Email configuration error: {0}")]
    Config(String),
}
