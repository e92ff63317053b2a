//! Authentication properties.
//!
//! String metadata carried alongside an identity: when the credential was
//! issued, when it expires, where to redirect after sign-in, and so on.
//! Well-known entries are stored under dotted keys and exposed through typed
//! accessors; everything else is free-form.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key of the issue timestamp.
pub const ISSUED_UTC_KEY: &str = ".issued";
/// Key of the expiry timestamp.
pub const EXPIRES_UTC_KEY: &str = ".expires";
/// Key of the post-authentication redirect target.
pub const REDIRECT_URI_KEY: &str = ".redirect";
/// Key marking a persistent credential.
pub const IS_PERSISTENT_KEY: &str = ".persistent";
/// Key of the refresh permission.
pub const ALLOW_REFRESH_KEY: &str = ".refresh";

// RFC 1123, always in GMT.
const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Metadata attached to an authentication ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticationProperties {
    dictionary: HashMap<String, String>,
}

impl AuthenticationProperties {
    /// Creates empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates properties from an existing dictionary.
    pub fn from_dictionary(dictionary: HashMap<String, String>) -> Self {
        Self { dictionary }
    }

    /// Raw dictionary.
    pub fn dictionary(&self) -> &HashMap<String, String> {
        &self.dictionary
    }

    /// Mutable raw dictionary.
    pub fn dictionary_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.dictionary
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.dictionary.get(key).map(String::as_str)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.dictionary.insert(key.into(), value.into())
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.dictionary.remove(key)
    }

    /// Time the credential was issued.
    ///
    /// A value that does not parse reads as `None`.
    pub fn issued_utc(&self) -> Option<DateTime<Utc>> {
        self.get_timestamp(ISSUED_UTC_KEY)
    }

    /// Sets or clears the issue time.
    pub fn set_issued_utc(&mut self, value: Option<DateTime<Utc>>) {
        self.set_timestamp(ISSUED_UTC_KEY, value);
    }

    /// Time the credential expires.
    ///
    /// A value that does not parse reads as `None`.
    pub fn expires_utc(&self) -> Option<DateTime<Utc>> {
        self.get_timestamp(EXPIRES_UTC_KEY)
    }

    /// Sets or clears the expiry time.
    pub fn set_expires_utc(&mut self, value: Option<DateTime<Utc>>) {
        self.set_timestamp(EXPIRES_UTC_KEY, value);
    }

    /// Where to send the user after authentication.
    pub fn redirect_uri(&self) -> Option<&str> {
        self.get(REDIRECT_URI_KEY)
    }

    /// Sets or clears the redirect target.
    pub fn set_redirect_uri(&mut self, value: Option<String>) {
        match value {
            Some(uri) => {
                self.dictionary.insert(REDIRECT_URI_KEY.to_string(), uri);
            },
            None => {
                self.dictionary.remove(REDIRECT_URI_KEY);
            },
        }
    }

    /// Whether the credential survives browser sessions.
    pub fn is_persistent(&self) -> bool {
        self.dictionary.contains_key(IS_PERSISTENT_KEY)
    }

    /// Marks the credential persistent or not.
    pub fn set_is_persistent(&mut self, value: bool) {
        if value {
            self.dictionary
                .insert(IS_PERSISTENT_KEY.to_string(), String::new());
        } else {
            self.dictionary.remove(IS_PERSISTENT_KEY);
        }
    }

    /// Whether the credential may be refreshed. `None` when unspecified.
    pub fn allow_refresh(&self) -> Option<bool> {
        match self.get(ALLOW_REFRESH_KEY)? {
            v if v.eq_ignore_ascii_case("true") => Some(true),
            v if v.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Sets or clears the refresh permission.
    pub fn set_allow_refresh(&mut self, value: Option<bool>) {
        match value {
            Some(allow) => {
                let text = if allow { "True" } else { "False" };
                self.dictionary
                    .insert(ALLOW_REFRESH_KEY.to_string(), text.to_string());
            },
            None => {
                self.dictionary.remove(ALLOW_REFRESH_KEY);
            },
        }
    }

    fn get_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw = self.get(key)?;
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    fn set_timestamp(&mut self, key: &str, value: Option<DateTime<Utc>>) {
        match value {
            Some(ts) => {
                self.dictionary
                    .insert(key.to_string(), ts.format(TIMESTAMP_FORMAT).to_string());
            },
            None => {
                self.dictionary.remove(key);
            },
        }
    }
}

impl From<HashMap<String, String>> for AuthenticationProperties {
    fn from(dictionary: HashMap<String, String>) -> Self {
        Self::from_dictionary(dictionary)
    }
}
