//! Identity validation context.

use sigil_claims::{AuthenticationProperties, AuthenticationTicket, ClaimsIdentity, Identity};
use tracing::debug;

use crate::{AuthError, CookieAuthenticationOptions};

/// Context handed to a provider's
/// [`validate_identity`](crate::CookieAuthenticationProvider::validate_identity).
///
/// Holds the identity and properties recovered from the request's ticket.
/// The provider may alter either, replace the identity, or reject it; the
/// handler reads the context back once the provider returns.
///
/// `R` is the pipeline's request type. The context only borrows it.
#[derive(Debug)]
pub struct CookieValidateIdentityContext<'a, R: ?Sized> {
    request: &'a R,
    options: &'a CookieAuthenticationOptions,
    identity: Option<ClaimsIdentity>,
    properties: AuthenticationProperties,
}

impl<'a, R: ?Sized> CookieValidateIdentityContext<'a, R> {
    /// Creates a context from the ticket presented with `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidArgument`] if `ticket` is `None`.
    pub fn new(
        request: &'a R,
        ticket: Option<AuthenticationTicket>,
        options: &'a CookieAuthenticationOptions,
    ) -> Result<Self, AuthError> {
        let ticket = ticket.ok_or(AuthError::InvalidArgument("ticket"))?;
        Ok(Self::from_ticket(request, ticket, options))
    }

    /// Creates a context from a ticket that is known to be present.
    pub fn from_ticket(
        request: &'a R,
        ticket: AuthenticationTicket,
        options: &'a CookieAuthenticationOptions,
    ) -> Self {
        let (identity, properties) = ticket.into_parts();
        Self {
            request,
            options,
            identity,
            properties,
        }
    }

    /// Request being authenticated.
    pub fn request(&self) -> &'a R {
        self.request
    }

    /// Pipeline options.
    pub fn options(&self) -> &'a CookieAuthenticationOptions {
        self.options
    }

    /// Identity arriving with the request, or `None` once rejected.
    pub fn identity(&self) -> Option<&ClaimsIdentity> {
        self.identity.as_ref()
    }

    /// Mutable access to the identity, to add or remove claims in place.
    pub fn identity_mut(&mut self) -> Option<&mut ClaimsIdentity> {
        self.identity.as_mut()
    }

    /// Metadata arriving with the request's ticket.
    pub fn properties(&self) -> &AuthenticationProperties {
        &self.properties
    }

    /// Mutable access to the ticket metadata.
    pub fn properties_mut(&mut self) -> &mut AuthenticationProperties {
        &mut self.properties
    }

    /// Replaces the identity of the request.
    ///
    /// A [`ClaimsIdentity`] is stored as given; any other identity is wrapped
    /// with [`ClaimsIdentity::from_identity`].
    pub fn replace_identity<I: Identity>(&mut self, identity: I) {
        let identity = match identity.into_claims_identity() {
            Ok(claims) => claims,
            Err(other) => ClaimsIdentity::from_identity(&other),
        };

        debug!(
            name = identity.name().unwrap_or_default(),
            authentication_type = identity.authentication_type().unwrap_or_default(),
            "identity replaced"
        );
        self.identity = Some(identity);
    }

    /// Rejects the identity. The request is then treated as anonymous.
    pub fn reject_identity(&mut self) {
        debug!("identity rejected");
        self.identity = None;
    }

    /// Final identity and properties, consumed by the handler.
    pub fn into_parts(self) -> (Option<ClaimsIdentity>, AuthenticationProperties) {
        (self.identity, self.properties)
    }
}
