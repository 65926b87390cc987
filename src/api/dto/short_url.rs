//! JSON representation of a short URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::ShortUrl;

/// A short URL as returned by the API.
///
/// `ownerId` and `customAlias` are omitted when absent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    pub id: Uuid,
    pub long_url: String,
    pub short_url: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShortUrlResponse {
    /// Builds the response for `url`, with `short_url` already resolved
    /// against the public base URL.
    pub fn new(url: ShortUrl, short_url: String) -> Self {
        Self {
            id: url.id,
            long_url: url.long_url,
            short_url,
            slug: url.slug,
            custom_alias: url.custom_alias,
            owner_id: url.owner_id,
            clicks: url.clicks,
            created_at: url.created_at,
            updated_at: url.updated_at,
        }
    }
}

/// Confirmation body for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
