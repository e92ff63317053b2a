//! Cookie authentication options.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Default authentication scheme label.
pub const DEFAULT_AUTHENTICATION_TYPE: &str = "Cookies";

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = ".AspNet.Cookies";

/// Default credential lifetime: 14 days.
pub const DEFAULT_EXPIRE_TIME_SPAN_SECS: i64 = 14 * 24 * 60 * 60;

/// Configuration of the cookie authentication pipeline.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieAuthenticationOptions {
    /// Scheme label given to identities issued by this pipeline.
    pub authentication_type: String,

    /// Name of the cookie carrying the ticket.
    pub cookie_name: String,

    /// Lifetime of an issued credential, in seconds.
    ///
    /// Also the expiry applied to tickets that carry an issue time but no
    /// expiry of their own.
    #[serde(rename = "expire_time_span")]
    pub expire_time_span_secs: i64,

    /// Re-issue the credential when more than half its lifetime has elapsed.
    pub sliding_expiration: bool,

    /// Path of the sign-in page.
    ///
    /// Not read by the handler; carried for the pipeline that issues
    /// sign-in redirects.
    pub login_path: Option<String>,

    /// Path of the sign-out page. Carried for the pipeline, like
    /// [`login_path`](Self::login_path).
    pub logout_path: Option<String>,

    /// Query parameter carrying the return URL on sign-in redirects. Carried
    /// for the pipeline, like [`login_path`](Self::login_path).
    pub return_url_parameter: String,
}

impl Default for CookieAuthenticationOptions {
    fn default() -> Self {
        Self {
            authentication_type: DEFAULT_AUTHENTICATION_TYPE.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            expire_time_span_secs: DEFAULT_EXPIRE_TIME_SPAN_SECS,
            sliding_expiration: true,
            login_path: None,
            logout_path: None,
            return_url_parameter: "ReturnUrl".to_string(),
        }
    }
}

impl CookieAuthenticationOptions {
    /// Parses and validates options from JSON.
    pub fn from_json(json: &str) -> Result<Self, AuthError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options are usable.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.authentication_type.is_empty() {
            return Err(AuthError::Configuration(
                "authentication_type must not be empty".into(),
            ));
        }

        if self.cookie_name.is_empty() {
            return Err(AuthError::Configuration("cookie_name must not be empty".into()));
        }

        if self.expire_time_span_secs <= 0 || self.expire_time_span().is_none() {
            return Err(AuthError::Configuration(format!(
                "expire_time_span out of range: {}",
                self.expire_time_span_secs
            )));
        }

        Ok(())
    }

    /// Credential lifetime, or `None` when the configured seconds do not
    /// fit a [`Duration`].
    pub fn expire_time_span(&self) -> Option<Duration> {
        Duration::try_seconds(self.expire_time_span_secs)
    }
}
