//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const SELECT_COLUMNS: &str =
    "id, long_url, slug, custom_alias, owner_id, clicks, created_at, updated_at, deleted_at";

/// PostgreSQL repository for short URLs.
///
/// Slug uniqueness among live records is enforced by the partial unique index
/// `short_urls_slug_active_key`; a violation surfaces as [`AppError::Conflict`].
/// Click counting is a single `UPDATE ... SET clicks = clicks + 1`.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(&format!(
            r#"
            INSERT INTO short_urls (id, long_url, slug, custom_alias, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_url.long_url)
        .bind(&new_url.slug)
        .bind(&new_url.custom_alias)
        .bind(new_url.owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError> {
        let url = sqlx::query_as::<_, ShortUrl>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM short_urls
            WHERE slug = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(url)
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<ShortUrl>, AppError> {
        let urls = sqlx::query_as::<_, ShortUrl>(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM short_urls
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(urls)
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET clicks = clicks + 1
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_long_url(
        &self,
        id: Uuid,
        owner_id: i64,
        long_url: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET long_url = $3, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(long_url)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn soft_delete(&self, id: Uuid, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
