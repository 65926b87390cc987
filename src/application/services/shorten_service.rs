//! Short URL creation.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::alias_policy::AliasPolicy;
use crate::domain::entities::{CallerIdentity, NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::slug_generator::generate_slug;
use crate::utils::url_validator::validate_url;

/// Attempts made with freshly generated slugs before giving up on a collision.
const MAX_GENERATED_SLUG_ATTEMPTS: usize = 5;

/// Service for creating short URLs.
///
/// Validates the target URL, resolves the slug (custom alias or generated),
/// and persists the record on behalf of the caller.
pub struct ShortenService<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
    alias_policy: AliasPolicy<R>,
    base_url: String,
}

impl<R: UrlRepository + ?Sized> ShortenService<R> {
    /// Creates a new shorten service.
    ///
    /// `base_url` is the public origin short URLs are served from; a trailing
    /// slash is ignored.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            alias_policy: AliasPolicy::new(repository.clone()),
            repository,
            base_url,
        }
    }

    /// Creates a short URL for `long_url`.
    ///
    /// When `custom_alias` is given it becomes the slug (after
    /// [`AliasPolicy::validate`]); otherwise a random 6-character slug is
    /// generated. The record is owned by the caller when authenticated.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `long_url` is not an http/https URL
    /// - alias errors from [`AliasPolicy::validate`]
    /// - [`AppError::AliasAlreadyInUse`] if the alias was claimed concurrently
    /// - [`AppError::Conflict`] if every generated slug collided
    /// - [`AppError::Internal`] on storage errors
    pub async fn create(
        &self,
        long_url: &str,
        custom_alias: Option<&str>,
        caller: &CallerIdentity,
    ) -> Result<ShortUrl, AppError> {
        let long_url = validate_url(long_url).inspect_err(|e| {
            tracing::debug!(reason = %e, "Rejected target URL");
        })?;

        let owner_id = caller.owner_id();

        let result = match custom_alias {
            Some(alias) => self.create_with_alias(long_url, alias, caller).await,
            None => self.create_with_generated_slug(long_url, owner_id).await,
        };

        match &result {
            Ok(url) => tracing::info!(
                slug = %url.slug,
                url_id = %url.id,
                owner_id = ?owner_id,
                custom = url.custom_alias.is_some(),
                "Short URL created"
            ),
            Err(e) => tracing::warn!(error = %e, owner_id = ?owner_id, "Short URL creation failed"),
        }

        result
    }

    /// Builds the public short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }

    async fn create_with_alias(
        &self,
        long_url: &str,
        alias: &str,
        caller: &CallerIdentity,
    ) -> Result<ShortUrl, AppError> {
        let slug = self.alias_policy.validate(alias, caller).await?;

        let new_url = NewShortUrl {
            long_url: long_url.to_string(),
            slug: slug.clone(),
            custom_alias: Some(slug.clone()),
            owner_id: caller.owner_id(),
        };

        self.repository.create(new_url).await.map_err(|e| match e {
            AppError::Conflict { .. } => AppError::alias_already_in_use(
                "Alias is already in use",
                json!({ "alias": slug }),
            ),
            other => other,
        })
    }

    async fn create_with_generated_slug(
        &self,
        long_url: &str,
        owner_id: Option<i64>,
    ) -> Result<ShortUrl, AppError> {
        for attempt in 1..=MAX_GENERATED_SLUG_ATTEMPTS {
            let new_url = NewShortUrl {
                long_url: long_url.to_string(),
                slug: generate_slug(),
                custom_alias: None,
                owner_id,
            };
            let slug = new_url.slug.clone();

            match self.repository.create(new_url).await {
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(%slug, attempt, "Generated slug collided, retrying");
                }
                result => return result,
            }
        }

        Err(AppError::conflict(
            "Failed to allocate a unique slug",
            json!({ "attempts": MAX_GENERATED_SLUG_ATTEMPTS }),
        ))
    }
}
