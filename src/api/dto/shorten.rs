//! DTOs for the shorten endpoint.

use serde::Deserialize;
use validator::Validate;

/// Upper bound on accepted target URL length.
pub const MAX_URL_LENGTH: u64 = 2048;

/// Request body for `POST /shorten`.
///
/// URL scheme and alias rules are enforced by the service layer so that they
/// report their dedicated error codes; this DTO only bounds the input size.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (http or https).
    #[validate(length(max = MAX_URL_LENGTH, message = "URL is too long"))]
    pub long_url: String,

    /// Optional custom alias; requires an authenticated caller.
    pub custom_alias: Option<String>,
}
