//! Integration tests for Sigil cookie validation.
//!
//! These tests drive the handler end-to-end: a request carrying a cookie, a
//! ticket recovered from it, an account directory acting as the validation
//! provider, and the final read-back.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use std::collections::HashMap;
use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sigil_claims::{claim_types, AuthenticationTicket, Claim, GenericIdentity, Identity};
use sigil_cookies::{
    AuthError, AuthenticateResult, Clock, CookieAuthenticationHandler,
    CookieAuthenticationOptions, CookieAuthenticationProvider, CookieValidateIdentityContext,
};
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// Logging
// ============================================================================

static TRACING: Once = Once::new();

/// Installs a test-friendly subscriber once per process.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

// ============================================================================
// Request & ticket jar
// ============================================================================

/// Minimal inbound request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub path: String,
    cookies: HashMap<String, String>,
}

impl Request {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            cookies: HashMap::new(),
        }
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name.to_string(), value.to_string());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Stand-in for the ticket protector: cookie values map to serialized tickets.
#[derive(Default)]
pub struct TicketJar {
    tickets: HashMap<String, String>,
}

impl TicketJar {
    pub fn issue(&mut self, cookie_value: &str, ticket: &AuthenticationTicket) -> Result<()> {
        let json = serde_json::to_string(ticket).context("Failed to serialize ticket")?;
        self.tickets.insert(cookie_value.to_string(), json);
        Ok(())
    }

    pub fn unprotect(&self, cookie_value: &str) -> Option<AuthenticationTicket> {
        let json = self.tickets.get(cookie_value)?;
        serde_json::from_str(json).ok()
    }
}

// ============================================================================
// Account directory provider
// ============================================================================

/// State of an account as known by the directory.
#[derive(Debug, Clone)]
pub enum AccountState {
    Active { roles: Vec<String> },
    Disabled,
    Renamed(String),
}

/// Validation provider backed by an in-memory account directory.
#[derive(Default)]
pub struct AccountDirectory {
    accounts: RwLock<HashMap<String, AccountState>>,
}

impl AccountDirectory {
    pub async fn set(&self, name: &str, state: AccountState) {
        self.accounts.write().await.insert(name.to_string(), state);
    }
}

#[async_trait]
impl CookieAuthenticationProvider<Request> for AccountDirectory {
    async fn validate_identity(
        &self,
        context: &mut CookieValidateIdentityContext<'_, Request>,
    ) -> Result<(), AuthError> {
        let Some(name) = context.identity().and_then(|i| i.name()).map(str::to_string) else {
            return Ok(());
        };

        let state = self.accounts.read().await.get(&name).cloned();
        match state {
            None => return Err(AuthError::Provider(format!("unknown account: {}", name))),
            Some(AccountState::Disabled) => context.reject_identity(),
            Some(AccountState::Renamed(new_name)) => {
                let renamed = GenericIdentity::new(new_name).with_authentication_type("Directory");
                context.replace_identity(renamed);
            },
            Some(AccountState::Active { roles }) => {
                if let Some(identity) = context.identity_mut() {
                    let missing: Vec<String> = roles
                        .into_iter()
                        .filter(|r| !identity.is_in_role(r))
                        .collect();
                    for role in missing {
                        let claim = Claim::new(claim_types::ROLE, role)
                            .map_err(|e| AuthError::Provider(e.to_string()))?;
                        identity.add_claim(claim);
                    }
                }
            },
        }

        context.properties_mut().insert("validated_by", "directory");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "account-directory"
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Cookie lookup, ticket recovery and validation wired together.
pub struct Pipeline {
    handler: CookieAuthenticationHandler<Request>,
    jar: TicketJar,
}

impl Pipeline {
    pub fn new(
        options: CookieAuthenticationOptions,
        provider: Arc<dyn CookieAuthenticationProvider<Request>>,
        clock: Arc<dyn Clock>,
        jar: TicketJar,
    ) -> Result<Self> {
        let handler = CookieAuthenticationHandler::new(options, provider)
            .context("Failed to build handler")?
            .with_clock(clock);
        Ok(Self { handler, jar })
    }

    pub async fn authenticate(&self, request: &Request) -> Result<AuthenticateResult> {
        tracing::debug!(path = %request.path, "authenticating request");
        let ticket = request
            .cookie(&self.handler.options().cookie_name)
            .and_then(|value| self.jar.unprotect(value));
        Ok(self.handler.authenticate(request, ticket).await?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sigil_claims::{AuthenticationProperties, ClaimsIdentity};
    use sigil_cookies::FixedClock;

    const COOKIE: &str = ".AspNet.Cookies";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap()
    }

    fn ticket_for(name: &str, roles: &[&str]) -> AuthenticationTicket {
        let mut identity =
            ClaimsIdentity::with_claims("Cookies", [Claim::new(claim_types::NAME, name).unwrap()]);
        for role in roles {
            identity.add_claim(Claim::new(claim_types::ROLE, *role).unwrap());
        }

        let mut properties = AuthenticationProperties::new();
        properties.set_issued_utc(Some(t0()));
        properties.set_expires_utc(Some(t0() + Duration::days(14)));
        properties.insert("issued", "t0");
        AuthenticationTicket::new(Some(identity), properties)
    }

    async fn pipeline(
        now: DateTime<Utc>,
        directory: Arc<AccountDirectory>,
        tickets: &[(&str, AuthenticationTicket)],
    ) -> Result<Pipeline> {
        init_tracing();

        let mut jar = TicketJar::default();
        for (value, ticket) in tickets {
            jar.issue(value, ticket)?;
        }

        Pipeline::new(
            CookieAuthenticationOptions::default(),
            directory,
            Arc::new(FixedClock(now)),
            jar,
        )
    }

    #[tokio::test]
    async fn test_active_account_gains_directory_roles() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());
        let roles = vec!["admin".to_string(), "ops".to_string()];
        directory.set("alice", AccountState::Active { roles }).await;

        let tickets = [("c1", ticket_for("alice", &["admin"]))];
        let pipeline = pipeline(t0() + Duration::hours(1), directory, &tickets).await?;
        let result = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "c1"))
            .await?;

        let identity = result.identity().context("expected authenticated")?;
        assert_eq!(identity.name(), Some("alice"));
        assert!(identity.is_in_role("ops"));
        assert_eq!(identity.find_all(claim_types::ROLE).count(), 2);
        assert_eq!(
            result.properties().and_then(|p| p.get("validated_by")),
            Some("directory")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_account_is_anonymous() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());
        directory.set("alice", AccountState::Disabled).await;

        let pipeline = pipeline(t0(), directory, &[("c1", ticket_for("alice", &["admin"]))]).await?;
        let result = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "c1"))
            .await?;

        assert_eq!(result, AuthenticateResult::Anonymous);
        Ok(())
    }

    #[tokio::test]
    async fn test_renamed_account_is_wrapped() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());
        directory.set("alice", AccountState::Renamed("bob".into())).await;

        let pipeline = pipeline(t0(), directory, &[("c1", ticket_for("alice", &["admin"]))]).await?;
        let result = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "c1"))
            .await?;

        let identity = result.identity().context("expected authenticated")?;
        assert_eq!(identity.name(), Some("bob"));
        assert_eq!(identity.authentication_type(), Some("Directory"));
        assert!(identity.claims().is_empty());
        assert_eq!(result.properties().and_then(|p| p.get("issued")), Some("t0"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_account_fails() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());

        let pipeline = pipeline(t0(), directory, &[("c1", ticket_for("mallory", &[]))]).await?;
        let result = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "c1"))
            .await;

        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_or_unknown_cookie_is_anonymous() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());
        let pipeline = pipeline(t0(), directory, &[]).await?;

        let no_cookie = pipeline.authenticate(&Request::new("/")).await?;
        let bad_cookie = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "forged"))
            .await?;

        assert_eq!(no_cookie, AuthenticateResult::Anonymous);
        assert_eq!(bad_cookie, AuthenticateResult::Anonymous);
        Ok(())
    }

    #[tokio::test]
    async fn test_sliding_renewal_after_validation() -> Result<()> {
        let directory = Arc::new(AccountDirectory::default());
        directory
            .set("alice", AccountState::Active { roles: vec![] })
            .await;

        let now = t0() + Duration::days(10);
        let pipeline = pipeline(now, directory, &[("c1", ticket_for("alice", &[]))]).await?;
        let result = pipeline
            .authenticate(&Request::new("/").with_cookie(COOKIE, "c1"))
            .await?;

        assert!(result.should_renew());
        let renewed = result.renewed_properties(now, None).context("renewal due")?;
        assert_eq!(renewed.expires_utc(), Some(now + Duration::days(14)));
        assert_eq!(renewed.get("validated_by"), Some("directory"));
        Ok(())
    }
}
