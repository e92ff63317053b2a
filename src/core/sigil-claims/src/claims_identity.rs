//! Claims-based identity.

use serde::{Deserialize, Serialize};

use crate::claim::{claim_types, Claim};
use crate::identity::Identity;

/// An identity described by a set of claims and an authentication-scheme
/// label.
///
/// The name and role of the identity are read from the claims whose types
/// match [`name_claim_type`](Self::name_claim_type) and
/// [`role_claim_type`](Self::role_claim_type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsIdentity {
    authentication_type: Option<String>,
    #[serde(default)]
    claims: Vec<Claim>,
    #[serde(default = "default_name_claim_type")]
    name_claim_type: String,
    #[serde(default = "default_role_claim_type")]
    role_claim_type: String,
    /// Name of a wrapped non-claims identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wrapped_name: Option<String>,
    /// Authenticated flag of a wrapped non-claims identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wrapped_authenticated: Option<bool>,
}

fn default_name_claim_type() -> String {
    claim_types::NAME.to_string()
}

fn default_role_claim_type() -> String {
    claim_types::ROLE.to_string()
}

impl Default for ClaimsIdentity {
    fn default() -> Self {
        Self {
            authentication_type: None,
            claims: Vec::new(),
            name_claim_type: default_name_claim_type(),
            role_claim_type: default_role_claim_type(),
            wrapped_name: None,
            wrapped_authenticated: None,
        }
    }
}

impl ClaimsIdentity {
    /// Creates an identity with no claims.
    pub fn new(authentication_type: impl Into<String>) -> Self {
        Self {
            authentication_type: Some(authentication_type.into()),
            ..Self::default()
        }
    }

    /// Creates an identity holding `claims`.
    pub fn with_claims<I>(authentication_type: impl Into<String>, claims: I) -> Self
    where
        I: IntoIterator<Item = Claim>,
    {
        Self {
            authentication_type: Some(authentication_type.into()),
            claims: claims.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Wraps an arbitrary identity.
    ///
    /// The result keeps the name, authentication type and authenticated flag
    /// of `identity` and carries no claims. The captured flag decides
    /// [`is_authenticated`](Identity::is_authenticated), whatever the
    /// authentication type says.
    pub fn from_identity<I: Identity + ?Sized>(identity: &I) -> Self {
        Self {
            authentication_type: identity.authentication_type().map(str::to_string),
            wrapped_name: identity.name().map(str::to_string),
            wrapped_authenticated: Some(identity.is_authenticated()),
            ..Self::default()
        }
    }

    /// Overrides the claim types used to resolve the name and roles.
    pub fn with_claim_types(
        mut self,
        name_claim_type: impl Into<String>,
        role_claim_type: impl Into<String>,
    ) -> Self {
        self.name_claim_type = name_claim_type.into();
        self.role_claim_type = role_claim_type.into();
        self
    }

    /// Claim type holding the name.
    pub fn name_claim_type(&self) -> &str {
        &self.name_claim_type
    }

    /// Claim type holding roles.
    pub fn role_claim_type(&self) -> &str {
        &self.role_claim_type
    }

    /// All claims, in insertion order.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Adds a claim.
    pub fn add_claim(&mut self, claim: Claim) {
        self.claims.push(claim);
    }

    /// Adds several claims.
    pub fn add_claims<I: IntoIterator<Item = Claim>>(&mut self, claims: I) {
        self.claims.extend(claims);
    }

    /// Removes the first claim with the given type and value.
    ///
    /// Returns the removed claim, or `None` if nothing matched.
    pub fn remove_claim(&mut self, claim_type: &str, value: &str) -> Option<Claim> {
        let index = self
            .claims
            .iter()
            .position(|c| c.matches(claim_type, value))?;
        Some(self.claims.remove(index))
    }

    /// First claim of the given type.
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    /// All claims of the given type.
    pub fn find_all<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a Claim> + 'a {
        self.claims.iter().filter(move |c| c.claim_type == claim_type)
    }

    /// Returns true if a claim with the given type and value exists.
    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims.iter().any(|c| c.matches(claim_type, value))
    }
}

impl Identity for ClaimsIdentity {
    fn name(&self) -> Option<&str> {
        self.find_first(&self.name_claim_type)
            .map(|c| c.value.as_str())
            .or(self.wrapped_name.as_deref())
    }

    fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    fn is_authenticated(&self) -> bool {
        if let Some(authenticated) = self.wrapped_authenticated {
            return authenticated;
        }

        self.authentication_type
            .as_deref()
            .is_some_and(|t| !t.is_empty())
    }

    fn is_in_role(&self, role: &str) -> bool {
        self.has_claim(&self.role_claim_type, role)
    }

    fn into_claims_identity(self) -> Result<ClaimsIdentity, Self> {
        Ok(self)
    }
}
