//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for service tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - short URL lifecycle (create, lookup, clicks, soft delete)
//! - [`UserRepository`] - users that own short URLs
//! - [`TokenRepository`] - API token authentication

pub mod token_repository;
pub mod url_repository;
pub mod user_repository;

pub use token_repository::TokenRepository;
pub use url_repository::UrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
