//! Claims.
//!
//! A claim is a single `(type, value)` statement about a subject, issued by
//! some authority.

use serde::{Deserialize, Serialize};

use crate::error::ClaimsError;

/// Well-known claim type URIs.
pub mod claim_types {
    /// Display name of the subject.
    pub const NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
    /// Stable identifier of the subject.
    pub const NAME_IDENTIFIER: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
    /// Email address of the subject.
    pub const EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
    /// Role membership.
    pub const ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
}

/// Value type assigned to claims created without an explicit one.
pub const STRING_VALUE_TYPE: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Issuer assigned to claims created without an explicit one.
pub const DEFAULT_ISSUER: &str = "LOCAL AUTHORITY";

/// A single statement about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type (usually a URI, see [`claim_types`]).
    pub claim_type: String,
    /// Claim value.
    pub value: String,
    /// Type of the value.
    #[serde(default = "default_value_type")]
    pub value_type: String,
    /// Authority that issued the claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_value_type() -> String {
    STRING_VALUE_TYPE.to_string()
}

fn default_issuer() -> String {
    DEFAULT_ISSUER.to_string()
}

impl Claim {
    /// Creates a string claim issued by the local authority.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError::InvalidClaim`] if `claim_type` is empty.
    pub fn new(
        claim_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ClaimsError> {
        let claim_type = claim_type.into();
        if claim_type.is_empty() {
            return Err(ClaimsError::InvalidClaim("claim type is empty".into()));
        }

        Ok(Self {
            claim_type,
            value: value.into(),
            value_type: default_value_type(),
            issuer: default_issuer(),
        })
    }

    /// Sets the issuing authority.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the value type.
    pub fn with_value_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    /// Returns true if this claim has the given type and value.
    pub fn matches(&self, claim_type: &str, value: &str) -> bool {
        self.claim_type == claim_type && self.value == value
    }
}
