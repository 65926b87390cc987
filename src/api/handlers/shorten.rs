//! Handler for the shorten endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::short_url::ShortUrlResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::domain::entities::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorten` (optional Bearer authentication)
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "customAlias": "my-link"   // optional, authenticated callers only
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": "6f1c…",
///   "longUrl": "https://example.com",
///   "shortUrl": "http://localhost:3000/my-link",
///   "slug": "my-link",
///   "customAlias": "my-link",
///   "ownerId": 1,
///   "clicks": 0,
///   "createdAt": "2025-01-01T00:00:00Z",
///   "updatedAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url`, `alias_*` or `validation_error`
/// - 409 `conflict` if no unique slug could be generated
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = state
        .shorten_service
        .create(&payload.long_url, payload.custom_alias.as_deref(), &caller)
        .await?;

    let short_url = state.shorten_service.short_url(&url.slug);

    Ok((
        StatusCode::CREATED,
        Json(ShortUrlResponse::new(url, short_url)),
    ))
}
