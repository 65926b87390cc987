//! Repository implementations.
//!
//! PostgreSQL implementations use SQLx runtime queries against the schema in
//! `migrations/`. In-memory implementations back the `memory` storage backend
//! and the HTTP integration tests.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] / [`InMemoryUrlRepository`] - short URL storage
//! - [`PgUserRepository`] - users
//! - [`PgTokenRepository`] - API token storage and validation
//! - [`InMemoryIdentityRepository`] - users and tokens without a database

pub mod memory_identity_repository;
pub mod memory_url_repository;
pub mod pg_token_repository;
pub mod pg_url_repository;
pub mod pg_user_repository;

pub use memory_identity_repository::InMemoryIdentityRepository;
pub use memory_url_repository::InMemoryUrlRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
