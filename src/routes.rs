//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`       - Storage health check (public)
//! - `POST /shorten`      - Create a short URL (optional Bearer token)
//! - `/my-urls/*`         - Owner-scoped management (Bearer token required)
//! - `GET  /{slug}`       - Short URL redirect (public)
//!
//! Static paths take precedence over `/{slug}`, which is why those words are
//! reserved as aliases.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Optional or required Bearer token per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

/// All routes with tracing and authentication, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::optional_auth_routes(state.clone()))
        .merge(api::routes::protected_routes(state.clone()))
        .route("/{slug}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
