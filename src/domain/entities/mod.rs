//! Core domain entities.
//!
//! - [`ShortUrl`] - a slug mapped to its target URL
//! - [`CallerIdentity`] - who is acting on a request (anonymous or a user)
//! - [`User`] / [`ApiToken`] - identity provider records
//!
//! Creation inputs use separate structs (`NewShortUrl`).

pub mod identity;
pub mod short_url;
pub mod user;

pub use identity::{CallerIdentity, Identity};
pub use short_url::{NewShortUrl, ShortUrl};
pub use user::{ApiToken, User};
