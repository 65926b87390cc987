//! DTO for the short URL update endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::api::dto::shorten::MAX_URL_LENGTH;

/// Request body for `PUT /my-urls/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUrlRequest {
    /// New destination URL for this short URL.
    #[validate(length(max = MAX_URL_LENGTH, message = "URL is too long"))]
    pub url: String,
}
