//! Owner-scoped listing, update and soft deletion.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::url_validator::validate_url;

/// Service for operations that only the owner of a short URL may perform.
///
/// Lookups are always scoped by `(id, owner_id)` in a single repository call,
/// so a record that belongs to someone else is reported exactly like one that
/// does not exist.
pub struct OwnershipService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> OwnershipService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists live short URLs owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_owned(&self, owner_id: i64) -> Result<Vec<ShortUrl>, AppError> {
        let urls = self.repository.find_by_owner(owner_id).await?;
        tracing::debug!(owner_id, count = urls.len(), "Listed owned short URLs");
        Ok(urls)
    }

    /// Points an owned short URL at a new target.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `new_long_url` is not an http/https URL
    /// - [`AppError::NotFound`] if `id` is not a live record owned by `owner_id`
    /// - [`AppError::Internal`] on storage errors
    pub async fn update(
        &self,
        id: &str,
        new_long_url: &str,
        owner_id: i64,
    ) -> Result<(), AppError> {
        let long_url = validate_url(new_long_url)?;

        let Some(url_id) = parse_id(id) else {
            return Err(not_found(id));
        };

        if !self
            .repository
            .update_long_url(url_id, owner_id, long_url)
            .await?
        {
            tracing::warn!(url_id = %id, owner_id, "Update rejected: not found for owner");
            return Err(not_found(id));
        }

        tracing::info!(url_id = %url_id, owner_id, "Short URL updated");
        Ok(())
    }

    /// Soft-deletes an owned short URL.
    ///
    /// The record keeps its click count but is no longer resolvable or listed.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if `id` is not a live record owned by `owner_id`
    /// - [`AppError::Internal`] on storage errors
    pub async fn soft_delete(&self, id: &str, owner_id: i64) -> Result<(), AppError> {
        let Some(url_id) = parse_id(id) else {
            return Err(not_found(id));
        };

        if !self.repository.soft_delete(url_id, owner_id).await? {
            tracing::warn!(url_id = %id, owner_id, "Delete rejected: not found for owner");
            return Err(not_found(id));
        }

        tracing::info!(url_id = %url_id, owner_id, "Short URL deleted");
        Ok(())
    }
}

/// Malformed ids cannot match any record, so they share the not-found path.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

fn not_found(id: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "id": id }))
}
