//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during cookie authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required argument was absent.
    #[error("invalid argument: {0} is required")]
    InvalidArgument(&'static str),

    /// Options configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The validation callback failed.
    #[error("identity validation failed: {0}")]
    Provider(String),

    /// Options could not be parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
