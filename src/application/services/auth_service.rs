//! Authentication service: resolves API tokens to caller identities.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{ApiToken, Identity};
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length of issued raw tokens.
const TOKEN_LEN: usize = 48;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Identity provider backed by opaque bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository + ?Sized = dyn TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were issued
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a raw bearer token to the identity of its owner.
    ///
    /// On success, touches `last_used_at`; a failure there is logged and does
    /// not fail authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn identify(&self, token: &str) -> Result<Identity, AppError> {
        let token_hash = self.hash_token(token);

        let Some(identity) = self.repository.find_identity(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id = identity.id, "Failed to update token last_used_at");
        }

        Ok(identity)
    }

    /// Issues a new token for `user_id`.
    ///
    /// Returns the raw token together with its stored metadata. The raw value is
    /// not recoverable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `name` is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue_token(&self, user_id: i64, name: &str) -> Result<(String, ApiToken), AppError> {
        let raw = generate_token();
        let token = self
            .repository
            .create_token(user_id, name, &self.hash_token(&raw))
            .await?;

        tracing::info!(user_id, token_id = token.id, name, "API token issued");
        Ok((raw, token))
    }

    /// Stores a caller-supplied raw token for `user_id`.
    ///
    /// Used to provision a known token, e.g. the seed identity of the memory
    /// backend.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `name` or the token is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_token(
        &self,
        user_id: i64,
        name: &str,
        raw: &str,
    ) -> Result<ApiToken, AppError> {
        let token = self
            .repository
            .create_token(user_id, name, &self.hash_token(raw))
            .await?;

        tracing::info!(user_id, token_id = token.id, name, "API token registered");
        Ok(token)
    }
}

/// Generates a random 48-character alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}
