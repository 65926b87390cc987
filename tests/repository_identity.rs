use sqlx::PgPool;
use std::sync::Arc;
use shortlink::domain::repositories::{TokenRepository, UserRepository};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

#[sqlx::test]
async fn test_create_user(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo.create("alice@example.com").await.unwrap();
    assert_eq!(user.email, "alice@example.com");

    let err = repo.create("alice@example.com").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found, Some(user));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = PgUserRepository::new(pool.clone())
        .create("t@example.com")
        .await
        .unwrap();
    let repo = PgTokenRepository::new(pool);

    let token = repo.create_token(user.id, "test-token", "hash123").await.unwrap();

    assert_eq!(token.user_id, user.id);
    assert_eq!(token.name, "test-token");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
}

#[sqlx::test]
async fn test_find_identity(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = PgUserRepository::new(pool.clone())
        .create("id@example.com")
        .await
        .unwrap();
    let repo = PgTokenRepository::new(pool);
    repo.create_token(user.id, "cli", "validhash").await.unwrap();

    let identity = repo.find_identity("validhash").await.unwrap().unwrap();
    assert_eq!(identity.id, user.id);
    assert_eq!(identity.email, "id@example.com");

    assert!(repo.find_identity("nonexistent").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_revoked_token_has_no_identity(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = PgUserRepository::new(pool.clone())
        .create("rev@example.com")
        .await
        .unwrap();
    let repo = PgTokenRepository::new(pool);

    let token = repo
        .create_token(user.id, "revoked-token", "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert!(repo.find_identity("revokedhash").await.unwrap().is_none());
    let stored = repo.find_by_name("revoked-token").await.unwrap().unwrap();
    assert!(stored.is_revoked());
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let pool = Arc::new(pool);
    let user = PgUserRepository::new(pool.clone())
        .create("used@example.com")
        .await
        .unwrap();
    let repo = PgTokenRepository::new(pool);
    let token = repo.create_token(user.id, "cli", "usedhash").await.unwrap();
    assert!(token.last_used_at.is_none());

    repo.update_last_used("usedhash").await.unwrap();

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}
