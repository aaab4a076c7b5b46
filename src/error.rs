//! Error types for buzon.

use thiserror::Error;

/// Common error type for buzon.
#[derive(Error, Debug)]
pub enum BuzonError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail transport error.
    #[error("mail error: {0}")]
    Mail(#[from] crate::mail::MailerError),
}

/// Result type alias for buzon operations.
pub type Result<T> = std::result::Result<T, BuzonError>;
