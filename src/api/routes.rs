//! API route configuration.
//!
//! Routes are grouped by the authentication layer they run behind; see
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    delete_my_url_handler, list_my_urls_handler, shorten_handler, update_my_url_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

/// Routes open to anonymous callers that still honour a Bearer token.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short URL (custom aliases need a token)
pub fn optional_auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(state, auth::optional_layer))
}

/// Routes that require Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /my-urls`      - List the caller's short URLs
/// - `PUT    /my-urls/{id}` - Change the target of an owned short URL
/// - `DELETE /my-urls/{id}` - Soft-delete an owned short URL
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/my-urls", get(list_my_urls_handler))
        .route(
            "/my-urls/{id}",
            put(update_my_url_handler).delete(delete_my_url_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::required_layer))
}
