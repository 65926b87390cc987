//! Handlers for the caller's own short URLs.
//!
//! All routes here sit behind the required authentication layer, which
//! provides the [`Identity`] extension.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::short_url::{MessageResponse, ShortUrlResponse};
use crate::api::dto::update_url::UpdateUrlRequest;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's live short URLs, newest first.
///
/// # Endpoint
///
/// `GET /my-urls`
pub async fn list_my_urls_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<ShortUrlResponse>>, AppError> {
    let urls = state.ownership_service.list_owned(identity.id).await?;

    let items = urls
        .into_iter()
        .map(|url| {
            let short_url = state.shorten_service.short_url(&url.slug);
            ShortUrlResponse::new(url, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Points one of the caller's short URLs at a new target.
///
/// # Endpoint
///
/// `PUT /my-urls/{id}` with body `{"url": "https://new.example.com"}`
///
/// # Errors
///
/// - 400 `invalid_url` or `validation_error`
/// - 404 `not_found` if the id is unknown, deleted, or owned by someone else
pub async fn update_my_url_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUrlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    state
        .ownership_service
        .update(&id, &payload.url, identity.id)
        .await?;

    Ok(Json(MessageResponse::new("URL updated successfully")))
}

/// Soft-deletes one of the caller's short URLs.
///
/// # Endpoint
///
/// `DELETE /my-urls/{id}`
///
/// # Errors
///
/// Returns 404 `not_found` if the id is unknown, deleted, or owned by someone else.
pub async fn delete_my_url_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.ownership_service.soft_delete(&id, identity.id).await?;

    Ok(Json(MessageResponse::new("URL deleted successfully")))
}
