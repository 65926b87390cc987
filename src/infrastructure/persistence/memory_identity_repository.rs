//! Process-local users and API tokens.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{ApiToken, Identity, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;

/// In-memory user and token storage.
///
/// Implements both [`UserRepository`] and [`TokenRepository`] so the identity
/// provider can run without a database. Uniqueness of emails, token names and
/// token hashes is enforced through the index maps' entry API.
#[derive(Debug)]
pub struct InMemoryIdentityRepository {
    users: DashMap<i64, User>,
    emails: DashMap<String, i64>,
    tokens: DashMap<i64, ApiToken>,
    token_hashes: DashMap<String, i64>,
    token_names: DashMap<String, i64>,
    next_user_id: AtomicI64,
    next_token_id: AtomicI64,
}

impl Default for InMemoryIdentityRepository {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            emails: DashMap::new(),
            tokens: DashMap::new(),
            token_hashes: DashMap::new(),
            token_names: DashMap::new(),
            next_user_id: AtomicI64::new(1),
            next_token_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unique_violation(constraint: &str) -> AppError {
    AppError::conflict(
        "Unique constraint violation",
        json!({ "constraint": constraint }),
    )
}

#[async_trait]
impl UserRepository for InMemoryIdentityRepository {
    async fn create(&self, email: &str) -> Result<User, AppError> {
        let id = match self.emails.entry(email.to_string()) {
            Entry::Occupied(_) => return Err(unique_violation("users_email_key")),
            Entry::Vacant(vacant) => {
                let id = self.next_user_id.fetch_add(1, Ordering::Relaxed);
                vacant.insert(id);
                id
            }
        };

        let user = User {
            id,
            email: email.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };

        Ok(self.users.get(&id).map(|user| user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.iter().map(|user| user.clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }
}

#[async_trait]
impl TokenRepository for InMemoryIdentityRepository {
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError> {
        let Some(token_id) = self.token_hashes.get(token_hash).map(|id| *id) else {
            return Ok(None);
        };

        let Some(user_id) = self
            .tokens
            .get(&token_id)
            .filter(|token| !token.is_revoked())
            .map(|token| token.user_id)
        else {
            return Ok(None);
        };

        Ok(self.users.get(&user_id).map(|user| Identity {
            id: user.id,
            email: user.email.clone(),
        }))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let Some(token_id) = self.token_hashes.get(token_hash).map(|id| *id) else {
            return Ok(());
        };

        if let Some(mut token) = self.tokens.get_mut(&token_id)
            && !token.is_revoked()
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        user_id: i64,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        if !self.users.contains_key(&user_id) {
            return Err(AppError::bad_request(
                "Unknown user",
                json!({ "user_id": user_id }),
            ));
        }

        let id = self.next_token_id.fetch_add(1, Ordering::Relaxed);

        match self.token_names.entry(name.to_string()) {
            Entry::Occupied(_) => return Err(unique_violation("api_tokens_name_key")),
            Entry::Vacant(vacant) => {
                vacant.insert(id);
            }
        }

        match self.token_hashes.entry(token_hash.to_string()) {
            Entry::Occupied(_) => {
                self.token_names.remove(name);
                return Err(unique_violation("api_tokens_token_hash_key"));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(id);
            }
        }

        let token = ApiToken {
            id,
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.tokens.insert(id, token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let mut tokens: Vec<ApiToken> = self.tokens.iter().map(|token| token.clone()).collect();
        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tokens)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tokens.get(&id).map(|token| token.clone()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let Some(id) = self.token_names.get(name).map(|id| *id) else {
            return Ok(None);
        };

        Ok(self.tokens.get(&id).map(|token| token.clone()))
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        if let Some(mut token) = self.tokens.get_mut(&id)
            && token.revoked_at.is_none()
        {
            token.revoked_at = Some(Utc::now());
        }

        Ok(())
    }
}
