//! Identity capability.

use serde::{Deserialize, Serialize};

use crate::ClaimsIdentity;

/// Minimal identity capability: a named principal that can answer role
/// membership queries.
///
/// Richer identities expose their claims through
/// [`into_claims_identity`](Identity::into_claims_identity).
pub trait Identity {
    /// Name of the principal, if any.
    fn name(&self) -> Option<&str>;

    /// Scheme the principal was authenticated with (e.g. "Cookies").
    fn authentication_type(&self) -> Option<&str>;

    /// Whether the principal has been authenticated.
    fn is_authenticated(&self) -> bool;

    /// Whether the principal is a member of `role`.
    fn is_in_role(&self, _role: &str) -> bool {
        false
    }

    /// Claims view of this identity.
    ///
    /// Returns `Ok` when the value already is a [`ClaimsIdentity`], and hands
    /// the value back in `Err` otherwise.
    fn into_claims_identity(self) -> Result<ClaimsIdentity, Self>
    where
        Self: Sized,
    {
        Err(self)
    }
}

/// A bare principal: a name, an authentication type and a list of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericIdentity {
    name: String,
    authentication_type: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl GenericIdentity {
    /// Creates a principal with no authentication type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authentication_type: None,
            roles: Vec::new(),
        }
    }

    /// Sets the authentication type.
    pub fn with_authentication_type(mut self, authentication_type: impl Into<String>) -> Self {
        self.authentication_type = Some(authentication_type.into());
        self
    }

    /// Sets the roles the principal belongs to.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Roles the principal belongs to.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

impl Identity for GenericIdentity {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }

    fn authentication_type(&self) -> Option<&str> {
        self.authentication_type.as_deref()
    }

    fn is_authenticated(&self) -> bool {
        !self.name.is_empty()
    }

    fn is_in_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
