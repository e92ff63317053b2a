//! Claims error types.

use thiserror::Error;

/// Errors that can occur while building claims.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    /// Claim is malformed (empty type, etc.).
    #[error("invalid claim: {0}")]
    InvalidClaim(String),
}
