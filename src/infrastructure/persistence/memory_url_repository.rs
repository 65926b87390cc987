//! Process-local implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry as MapEntry;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Stored record plus its insertion sequence, used to order records created
/// within the same clock tick.
#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    url: ShortUrl,
}

/// In-memory short URL storage backed by `DashMap`.
///
/// `active_slugs` indexes live records by slug and is the uniqueness guard:
/// claiming a slug goes through its entry API, so two concurrent creates with
/// the same slug cannot both succeed. Per-record mutations (clicks, update,
/// delete) happen under the record's shard lock.
///
/// The two maps are never locked at the same time.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    records: DashMap<Uuid, Entry>,
    active_slugs: DashMap<String, Uuid>,
    next_seq: AtomicU64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let id = Uuid::new_v4();

        match self.active_slugs.entry(new_url.slug.clone()) {
            MapEntry::Occupied(_) => {
                return Err(AppError::conflict(
                    "Unique constraint violation",
                    json!({ "constraint": "short_urls_slug_active_key" }),
                ));
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(id);
            }
        }

        let now = Utc::now();
        let url = ShortUrl {
            id,
            long_url: new_url.long_url,
            slug: new_url.slug,
            custom_alias: new_url.custom_alias,
            owner_id: new_url.owner_id,
            clicks: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.records.insert(
            id,
            Entry {
                seq,
                url: url.clone(),
            },
        );

        Ok(url)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortUrl>, AppError> {
        let Some(id) = self.active_slugs.get(slug).map(|id| *id) else {
            return Ok(None);
        };

        Ok(self
            .records
            .get(&id)
            .filter(|entry| !entry.url.is_deleted())
            .map(|entry| entry.url.clone()))
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<ShortUrl>, AppError> {
        let mut owned: Vec<Entry> = self
            .records
            .iter()
            .filter(|entry| entry.url.is_owned_by(owner_id) && !entry.url.is_deleted())
            .map(|entry| entry.value().clone())
            .collect();

        owned.sort_by(|a, b| {
            b.url
                .created_at
                .cmp(&a.url.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(owned.into_iter().map(|entry| entry.url).collect())
    }

    async fn increment_clicks(&self, id: Uuid) -> Result<bool, AppError> {
        let Some(mut entry) = self.records.get_mut(&id) else {
            return Ok(false);
        };

        if entry.url.is_deleted() {
            return Ok(false);
        }

        entry.url.clicks += 1;
        Ok(true)
    }

    async fn update_long_url(
        &self,
        id: Uuid,
        owner_id: i64,
        long_url: &str,
    ) -> Result<bool, AppError> {
        let Some(mut entry) = self.records.get_mut(&id) else {
            return Ok(false);
        };

        if !entry.url.is_owned_by(owner_id) || entry.url.is_deleted() {
            return Ok(false);
        }

        entry.url.long_url = long_url.to_string();
        entry.url.updated_at = Utc::now();
        Ok(true)
    }

    async fn soft_delete(&self, id: Uuid, owner_id: i64) -> Result<bool, AppError> {
        let slug = {
            let Some(mut entry) = self.records.get_mut(&id) else {
                return Ok(false);
            };

            if !entry.url.is_owned_by(owner_id) || entry.url.is_deleted() {
                return Ok(false);
            }

            let now = Utc::now();
            entry.url.deleted_at = Some(now);
            entry.url.updated_at = now;
            entry.url.slug.clone()
        };

        self.active_slugs.remove_if(&slug, |_, claimed| *claimed == id);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Reads a record regardless of its deletion state.
    fn stored(repo: &InMemoryUrlRepository, id: Uuid) -> ShortUrl {
        repo.records.get(&id).unwrap().url.clone()
    }

    fn new_url(slug: &str, owner_id: Option<i64>) -> NewShortUrl {
        NewShortUrl {
            long_url: format!("https://example.com/{slug}"),
            slug: slug.to_string(),
            custom_alias: None,
            owner_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_slug() {
        let repo = InMemoryUrlRepository::new();

        let created = repo.create(new_url("abc123", None)).await.unwrap();
        assert_eq!(created.clicks, 0);

        let found = repo.find_by_slug("abc123").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_slug("ABC123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let repo = InMemoryUrlRepository::new();

        repo.create(new_url("dup", None)).await.unwrap();
        let err = repo.create(new_url("dup", None)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(repo.records.len(), 1);
    }

    #[tokio::test]
    async fn test_slug_reusable_after_soft_delete() {
        let repo = InMemoryUrlRepository::new();

        let first = repo.create(new_url("reuse", Some(1))).await.unwrap();
        assert!(repo.soft_delete(first.id, 1).await.unwrap());

        let second = repo.create(new_url("reuse", Some(2))).await.unwrap();
        let found = repo.find_by_slug("reuse").await.unwrap().unwrap();

        assert_eq!(found.id, second.id);
        assert!(stored(&repo, first.id).is_deleted());
    }

    #[tokio::test]
    async fn test_soft_delete_requires_owner() {
        let repo = InMemoryUrlRepository::new();
        let url = repo.create(new_url("owned", Some(1))).await.unwrap();
        let anonymous = repo.create(new_url("anon", None)).await.unwrap();

        assert!(!repo.soft_delete(url.id, 2).await.unwrap());
        assert!(!repo.soft_delete(anonymous.id, 1).await.unwrap());
        assert!(repo.soft_delete(url.id, 1).await.unwrap());
        assert!(!repo.soft_delete(url.id, 1).await.unwrap());

        let deleted = stored(&repo, url.id);
        assert_eq!(deleted.clicks, url.clicks);
        assert!(repo.find_by_slug("owned").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_requires_owner() {
        let repo = InMemoryUrlRepository::new();
        let url = repo.create(new_url("upd", Some(1))).await.unwrap();

        assert!(!repo.update_long_url(url.id, 2, "https://x.com").await.unwrap());
        assert!(repo.update_long_url(url.id, 1, "https://x.com").await.unwrap());

        let updated = repo.find_by_slug("upd").await.unwrap().unwrap();
        assert_eq!(updated.long_url, "https://x.com");
        assert!(updated.updated_at >= url.updated_at);
    }

    #[tokio::test]
    async fn test_increment_skips_deleted() {
        let repo = InMemoryUrlRepository::new();
        let url = repo.create(new_url("clk", Some(1))).await.unwrap();

        assert!(repo.increment_clicks(url.id).await.unwrap());
        repo.soft_delete(url.id, 1).await.unwrap();
        assert!(!repo.increment_clicks(url.id).await.unwrap());
        assert!(!repo.increment_clicks(Uuid::new_v4()).await.unwrap());

        assert_eq!(stored(&repo, url.id).clicks, 1);
    }

    #[tokio::test]
    async fn test_find_by_owner_newest_first() {
        let repo = InMemoryUrlRepository::new();
        let a = repo.create(new_url("aaa", Some(1))).await.unwrap();
        let b = repo.create(new_url("bbb", Some(1))).await.unwrap();
        repo.create(new_url("ccc", Some(2))).await.unwrap();
        let d = repo.create(new_url("ddd", Some(1))).await.unwrap();
        repo.soft_delete(b.id, 1).await.unwrap();

        let ids: Vec<_> = repo
            .find_by_owner(1)
            .await
            .unwrap()
            .into_iter()
            .map(|url| url.id)
            .collect();

        assert_eq!(ids, vec![d.id, a.id]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let url = repo.create(new_url("hot", None)).await.unwrap();

        let id = url.id;

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..200 {
            let repo = repo.clone();
            tasks.spawn(async move { repo.increment_clicks(id).await.unwrap() });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(result.unwrap());
        }

        assert_eq!(stored(&repo, url.id).clicks, 200);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_same_slug_one_wins() {
        let repo = Arc::new(InMemoryUrlRepository::new());

        let mut tasks = tokio::task::JoinSet::new();
        for owner in 0..16 {
            let repo = repo.clone();
            tasks.spawn(async move { repo.create(new_url("contested", Some(owner))).await });
        }

        let mut successes = 0;
        let mut conflicts = 0;
        while let Some(result) = tasks.join_next().await {
            match result.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
    }
}
