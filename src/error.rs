//! Error types for the daily-motivation client.

use crate::api::ApiError;

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Backend request failed.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Terminal setup, drawing or input error.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Logging setup error.
    #[error("logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ClientError>;
