//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, OwnershipService, RedirectService, ShortenService};
use crate::domain::repositories::{TokenRepository, UrlRepository};

/// Services shared by all request handlers.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub redirect_service: Arc<RedirectService>,
    pub ownership_service: Arc<OwnershipService>,
    pub auth_service: Arc<AuthService>,
    /// Direct storage handle for the health check.
    pub url_repository: Arc<dyn UrlRepository>,
}

impl AppState {
    /// Wires every service over one URL repository and one token repository.
    ///
    /// `base_url` is the public origin prepended to slugs; `signing_secret`
    /// keys the API token hashes.
    pub fn new(
        url_repository: Arc<dyn UrlRepository>,
        token_repository: Arc<dyn TokenRepository>,
        base_url: &str,
        signing_secret: &str,
    ) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(url_repository.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(url_repository.clone())),
            ownership_service: Arc::new(OwnershipService::new(url_repository.clone())),
            auth_service: Arc::new(AuthService::new(
                token_repository,
                signing_secret.to_string(),
            )),
            url_repository,
        }
    }
}
