//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and ownership rules, and
//! give HTTP handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - short URL creation
//! - [`services::alias_policy::AliasPolicy`] - custom alias rules
//! - [`services::redirect_service::RedirectService`] - slug resolution and click counting
//! - [`services::ownership_service::OwnershipService`] - owner-scoped list, update and delete
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
