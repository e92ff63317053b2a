//! # Sigil Claims
//!
//! Identity model shared by the Sigil authentication crates.
//!
//! This crate provides:
//! - Claims and claims identities
//! - The [`Identity`] capability trait and a bare [`GenericIdentity`]
//! - Authentication properties carried alongside an identity
//! - Authentication tickets pairing the two

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod claim;
pub mod claims_identity;
pub mod error;
pub mod identity;
pub mod properties;
pub mod ticket;

pub use claim::{claim_types, Claim};
pub use claims_identity::ClaimsIdentity;
pub use error::ClaimsError;
pub use identity::{GenericIdentity, Identity};
pub use properties::AuthenticationProperties;
pub use ticket::AuthenticationTicket;
