//! Validation callback seam.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{AuthError, CookieValidateIdentityContext};

/// Application hook invoked for every request that carries a ticket.
///
/// Implementations inspect the [`CookieValidateIdentityContext`] and may
/// alter its identity or properties, replace the identity, or reject it
/// (for instance when the account has been disabled since the ticket was
/// issued). Returning an error aborts authentication of the request.
#[async_trait]
pub trait CookieAuthenticationProvider<R: ?Sized + Sync>: Send + Sync {
    /// Validates the identity held by `context`.
    ///
    /// The default implementation accepts the identity unchanged.
    async fn validate_identity(
        &self,
        _context: &mut CookieValidateIdentityContext<'_, R>,
    ) -> Result<(), AuthError> {
        Ok(())
    }

    /// Returns the name of this provider for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Provider that accepts every identity as presented.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProvider;

#[async_trait]
impl<R: ?Sized + Sync> CookieAuthenticationProvider<R> for DefaultProvider {
    fn name(&self) -> &'static str {
        "default"
    }
}

/// Synchronous validation callback.
pub type ValidateIdentityFn<R> =
    Arc<dyn Fn(&mut CookieValidateIdentityContext<'_, R>) -> Result<(), AuthError> + Send + Sync>;

/// Provider backed by a closure.
pub struct FnProvider<R: ?Sized> {
    on_validate_identity: ValidateIdentityFn<R>,
}

impl<R: ?Sized> FnProvider<R> {
    /// Creates a provider that runs `on_validate_identity` for each request.
    pub fn new(on_validate_identity: ValidateIdentityFn<R>) -> Self {
        Self {
            on_validate_identity,
        }
    }
}

#[async_trait]
impl<R: ?Sized + Sync> CookieAuthenticationProvider<R> for FnProvider<R> {
    async fn validate_identity(
        &self,
        context: &mut CookieValidateIdentityContext<'_, R>,
    ) -> Result<(), AuthError> {
        (self.on_validate_identity)(context)
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}
