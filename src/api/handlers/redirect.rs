//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its target URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Each successful redirect increments the click counter by exactly one
/// before responding with `302 Found`.
///
/// # Errors
///
/// Returns 404 Not Found if no live short URL has this slug.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state.redirect_service.resolve(&slug).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}
