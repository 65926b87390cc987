//! Bearer token authentication middleware.
//!
//! Both layers resolve the caller through [`crate::application::services::AuthService`]
//! and store the result as a [`CallerIdentity`] request extension. The
//! required layer additionally stores the bare [`Identity`].

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::{CallerIdentity, Identity};
use crate::{error::AppError, state::AppState};

/// Authenticates the caller when credentials are present.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A request without an `Authorization` header proceeds as
/// [`CallerIdentity::Anonymous`]. A malformed, unknown or revoked token also
/// degrades to anonymous, so a stale token never blocks anonymous shortening.
///
/// # Errors
///
/// Returns `500 Internal Server Error` only if token lookup itself fails.
pub async fn optional_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let caller = if parts.headers.contains_key(header::AUTHORIZATION) {
        match bearer_token(&mut parts).await {
            Ok(token) => match st.auth_service.identify(&token).await {
                Ok(identity) => identity.into(),
                Err(AppError::Unauthorized { .. }) => {
                    tracing::debug!("Invalid bearer token, continuing anonymously");
                    CallerIdentity::Anonymous
                }
                Err(e) => return Err(e),
            },
            Err(_) => {
                tracing::debug!("Malformed Authorization header, continuing anonymously");
                CallerIdentity::Anonymous
            }
        }
    } else {
        CallerIdentity::Anonymous
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Resolve the token hash to a user (revoked tokens never match)
/// 3. Touch `last_used_at`
/// 4. Store the identity and continue to the handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/my-urls", get(list_my_urls_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::required_layer));
/// ```
pub async fn required_layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await?;
    let identity: Identity = st.auth_service.identify(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut()
        .insert(CallerIdentity::from(identity.clone()));
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

async fn bearer_token(parts: &mut Parts) -> Result<String, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    Ok(token)
}
