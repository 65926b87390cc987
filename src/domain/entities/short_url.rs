//! Short URL entity: the mapping from a slug to its target URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored short URL record.
///
/// `owner_id` is a weak reference to a user: removing the user does not touch
/// the record. `deleted_at` marks a soft-deleted record, which is kept for its
/// history and click count but never served.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShortUrl {
    pub id: Uuid,
    pub long_url: String,
    pub slug: String,
    pub custom_alias: Option<String>,
    pub owner_id: Option<i64>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ShortUrl {
    /// Returns true if the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if `owner_id` matches the given user.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Input data for creating a short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub long_url: String,
    pub slug: String,
    pub custom_alias: Option<String>,
    pub owner_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner_id: Option<i64>, deleted_at: Option<DateTime<Utc>>) -> ShortUrl {
        let now = Utc::now();
        ShortUrl {
            id: Uuid::new_v4(),
            long_url: "https://example.com".to_string(),
            slug: "abc123".to_string(),
            custom_alias: None,
            owner_id,
            clicks: 0,
            created_at: now,
            updated_at: now,
            deleted_at,
        }
    }

    #[test]
    fn test_is_deleted() {
        assert!(!record(None, None).is_deleted());
        assert!(record(None, Some(Utc::now())).is_deleted());
    }

    #[test]
    fn test_is_owned_by() {
        let owned = record(Some(7), None);
        assert!(owned.is_owned_by(7));
        assert!(!owned.is_owned_by(8));
        assert!(!record(None, None).is_owned_by(7));
    }
}
