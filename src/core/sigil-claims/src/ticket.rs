//! Authentication tickets.

use serde::{Deserialize, Serialize};

use crate::{AuthenticationProperties, ClaimsIdentity};

/// An identity paired with the properties it was issued with.
///
/// Tickets are produced when a credential is issued and recovered when it
/// is presented again; serialization and protection of the ticket happen
/// elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationTicket {
    identity: Option<ClaimsIdentity>,
    #[serde(default)]
    properties: AuthenticationProperties,
}

impl AuthenticationTicket {
    /// Creates a ticket.
    pub fn new(identity: Option<ClaimsIdentity>, properties: AuthenticationProperties) -> Self {
        Self {
            identity,
            properties,
        }
    }

    /// Identity carried by the ticket.
    pub fn identity(&self) -> Option<&ClaimsIdentity> {
        self.identity.as_ref()
    }

    /// Properties carried by the ticket.
    pub fn properties(&self) -> &AuthenticationProperties {
        &self.properties
    }

    /// Splits the ticket into its identity and properties.
    pub fn into_parts(self) -> (Option<ClaimsIdentity>, AuthenticationProperties) {
        (self.identity, self.properties)
    }
}
