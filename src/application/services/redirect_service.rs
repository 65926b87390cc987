//! Slug resolution with click accounting.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Resolves slugs to target URLs and counts each successful visit.
pub struct RedirectService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> RedirectService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns the target URL for `slug` and records one click.
    ///
    /// The increment is a single atomic storage operation, so concurrent
    /// redirects never lose counts. A record soft-deleted between the lookup
    /// and the increment is treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no live record has this slug.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        let Some(url) = self.repository.find_by_slug(slug).await? else {
            tracing::debug!(%slug, "Redirect miss");
            return Err(not_found(slug));
        };

        if !self.repository.increment_clicks(url.id).await? {
            tracing::debug!(%slug, url_id = %url.id, "Record removed before click was counted");
            return Err(not_found(slug));
        }

        tracing::debug!(%slug, url_id = %url.id, "Redirect hit");
        Ok(url.long_url)
    }
}

fn not_found(slug: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "slug": slug }))
}
