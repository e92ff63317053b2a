//! # Sigil Cookies
//!
//! Identity validation for cookie authentication.
//!
//! When a request arrives with an authentication ticket recovered from its
//! cookie, the [`CookieAuthenticationHandler`] checks the ticket's lifetime,
//! hands a [`CookieValidateIdentityContext`] to the application's
//! [`CookieAuthenticationProvider`], and reads the context back to decide
//! whether the request is authenticated, authenticated with a replaced
//! identity, or anonymous.
//!
//! Ticket protection and cookie transport are not handled here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod context;
pub mod error;
pub mod handler;
pub mod options;
pub mod provider;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::CookieValidateIdentityContext;
pub use error::AuthError;
pub use handler::{AuthenticateResult, CookieAuthenticationHandler};
pub use options::CookieAuthenticationOptions;
pub use provider::{CookieAuthenticationProvider, DefaultProvider, FnProvider, ValidateIdentityFn};
