//! Repository trait for short URL persistence.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence boundary for short URLs.
///
/// Every read path excludes soft-deleted records. Mutations that require
/// ownership take `(id, owner_id)` together so that "absent" and "owned by
/// someone else" are the same outcome.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a non-deleted record already uses the slug.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a non-deleted record by slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Lists non-deleted records owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<ShortUrl>, AppError>;

    /// Atomically adds one to `clicks` of a non-deleted record.
    ///
    /// Returns `Ok(false)` if the record no longer exists or was deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, id: Uuid) -> Result<bool, AppError>;

    /// Replaces `long_url` of a non-deleted record owned by `owner_id`.
    ///
    /// Returns `Ok(false)` when no record matches both `id` and `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update_long_url(
        &self,
        id: Uuid,
        owner_id: i64,
        long_url: &str,
    ) -> Result<bool, AppError>;

    /// Soft-deletes a non-deleted record owned by `owner_id`.
    ///
    /// Returns `Ok(false)` when no record matches both `id` and `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn soft_delete(&self, id: Uuid, owner_id: i64) -> Result<bool, AppError>;

    /// Verifies that the storage backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backend cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
