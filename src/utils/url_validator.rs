//! Target URL validation shared by creation and update.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Validates a target URL and returns it trimmed.
///
/// The URL must be non-empty after trimming, contain no control characters,
/// parse as an absolute URL and use the `http` or `https` scheme. The trimmed
/// input is returned as-is; it is not normalized.
///
/// The parser silently drops embedded tabs and newlines, so they are rejected
/// up front: the stored value must remain a valid `Location` header.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for blank input,
/// [`UrlValidationError::InvalidFormat`] for unparsable or relative URLs or
/// embedded control characters, and
/// [`UrlValidationError::UnsupportedProtocol`] for any other scheme.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url(" https://example.com ").unwrap(), "https://example.com");
/// assert!(validate_url("ftp://x.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain control characters".to_string(),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must include a host".to_string(),
        ));
    }

    Ok(trimmed)
}
