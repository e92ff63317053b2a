//! Cookie authentication handler.
//!
//! Runs the validation step for a ticket recovered from a request and reads
//! the outcome back.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sigil_claims::{AuthenticationProperties, AuthenticationTicket, ClaimsIdentity, Identity};
use tracing::{debug, info, warn};

use crate::{
    AuthError, Clock, CookieAuthenticationOptions, CookieAuthenticationProvider,
    CookieValidateIdentityContext, SystemClock,
};

/// Outcome of authenticating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateResult {
    /// No usable identity: the request is anonymous.
    Anonymous,
    /// The request is authenticated.
    Authenticated {
        /// Final identity, possibly altered or replaced by the provider.
        identity: ClaimsIdentity,
        /// Final properties, possibly altered by the provider.
        properties: AuthenticationProperties,
        /// The credential should be re-issued (sliding expiration).
        should_renew: bool,
    },
}

impl AuthenticateResult {
    /// Returns true if the request is authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Authenticated identity, if any.
    pub fn identity(&self) -> Option<&ClaimsIdentity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { identity, .. } => Some(identity),
        }
    }

    /// Properties of the authenticated request, if any.
    pub fn properties(&self) -> Option<&AuthenticationProperties> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { properties, .. } => Some(properties),
        }
    }

    /// Returns true if the credential should be re-issued.
    pub fn should_renew(&self) -> bool {
        matches!(self, Self::Authenticated { should_renew: true, .. })
    }

    /// Properties for the re-issued credential.
    ///
    /// Shifts the issue time to `now` and keeps the original lifetime, or
    /// `default_lifetime` when the properties lack an issue or expiry time.
    /// Returns `None` when no renewal is due, the lifetime is unknown, or the
    /// new expiry is out of range.
    pub fn renewed_properties(
        &self,
        now: DateTime<Utc>,
        default_lifetime: Option<Duration>,
    ) -> Option<AuthenticationProperties> {
        let Self::Authenticated {
            properties,
            should_renew: true,
            ..
        } = self
        else {
            return None;
        };

        let lifetime = match (properties.issued_utc(), properties.expires_utc()) {
            (Some(issued), Some(expires)) => expires - issued,
            _ => default_lifetime?,
        };
        let expires = now.checked_add_signed(lifetime)?;

        let mut renewed = properties.clone();
        renewed.set_issued_utc(Some(now));
        renewed.set_expires_utc(Some(expires));
        Some(renewed)
    }
}

/// Validates tickets presented with requests of type `R`.
pub struct CookieAuthenticationHandler<R: ?Sized + Sync> {
    options: CookieAuthenticationOptions,
    provider: Arc<dyn CookieAuthenticationProvider<R>>,
    clock: Arc<dyn Clock>,
}

impl<R: ?Sized + Sync> CookieAuthenticationHandler<R> {
    /// Creates a handler using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if `options` are invalid.
    pub fn new(
        options: CookieAuthenticationOptions,
        provider: Arc<dyn CookieAuthenticationProvider<R>>,
    ) -> Result<Self, AuthError> {
        options.validate()?;
        Ok(Self {
            options,
            provider,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replaces the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handler options.
    pub fn options(&self) -> &CookieAuthenticationOptions {
        &self.options
    }

    /// Properties for re-issuing the credential of `result`, stamped with
    /// the handler's clock.
    ///
    /// Tickets without their own lifetime get the configured
    /// [`expire_time_span`](CookieAuthenticationOptions::expire_time_span).
    pub fn renewed_properties(
        &self,
        result: &AuthenticateResult,
    ) -> Option<AuthenticationProperties> {
        result.renewed_properties(self.clock.utc_now(), self.options.expire_time_span())
    }

    /// Authenticates `request` from the ticket recovered from its cookie.
    ///
    /// Missing or expired tickets yield [`AuthenticateResult::Anonymous`]
    /// without invoking the provider. Otherwise the provider runs, and a
    /// rejected identity also yields `Anonymous`. A ticket with an issue time
    /// but no expiry expires after the configured lifetime.
    ///
    /// # Errors
    ///
    /// Propagates the provider's error.
    pub async fn authenticate(
        &self,
        request: &R,
        ticket: Option<AuthenticationTicket>,
    ) -> Result<AuthenticateResult, AuthError> {
        let Some(ticket) = ticket else {
            debug!(
                cookie = %self.options.cookie_name,
                "no ticket presented"
            );
            return Ok(AuthenticateResult::Anonymous);
        };

        let now = self.clock.utc_now();
        let issued = ticket.properties().issued_utc();
        let expires = ticket.properties().expires_utc().or_else(|| {
            let span = self.options.expire_time_span()?;
            issued?.checked_add_signed(span)
        });

        if let Some(expires) = expires {
            if expires < now {
                debug!(%expires, "ticket expired");
                return Ok(AuthenticateResult::Anonymous);
            }
        }

        let mut should_renew = false;
        if self.options.sliding_expiration && ticket.properties().allow_refresh() != Some(false) {
            if let (Some(issued), Some(expires)) = (issued, expires) {
                let elapsed = now - issued;
                let remaining = expires - now;
                should_renew = remaining < elapsed;
            }
        }

        let mut context =
            CookieValidateIdentityContext::from_ticket(request, ticket, &self.options);
        if let Err(e) = self.provider.validate_identity(&mut context).await {
            warn!(provider = self.provider.name(), error = %e, "identity validation failed");
            return Err(e);
        }

        let (identity, properties) = context.into_parts();
        let Some(identity) = identity else {
            info!(
                authentication_type = %self.options.authentication_type,
                provider = self.provider.name(),
                "identity rejected, request is anonymous"
            );
            return Ok(AuthenticateResult::Anonymous);
        };

        debug!(
            name = identity.name().unwrap_or_default(),
            should_renew,
            "request authenticated"
        );

        Ok(AuthenticateResult::Authenticated {
            identity,
            properties,
            should_renew,
        })
    }
}
