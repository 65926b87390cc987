//! Custom alias validation and authorization.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::json;

use crate::domain::entities::CallerIdentity;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Allowed alias shape: 3-30 characters from `[A-Za-z0-9_-]`.
static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,30}$").unwrap());

/// Aliases that would shadow other routes at the HTTP boundary.
///
/// Compared against the lower-cased alias.
pub const RESERVED_ALIASES: &[&str] = &[
    "auth", "docs", "shorten", "my-urls", "api", "admin", "www", "health",
];

/// Returns true if the alias collides with a reserved route, ignoring case.
pub fn is_reserved(alias: &str) -> bool {
    let lowered = alias.to_ascii_lowercase();
    RESERVED_ALIASES.contains(&lowered.as_str())
}

/// Checks alias length and character set without touching storage.
///
/// # Errors
///
/// Returns [`AppError::AliasInvalidFormat`] if the alias is not 3-30
/// characters of letters, digits, `_` or `-`.
pub fn check_alias_format(alias: &str) -> Result<(), AppError> {
    if ALIAS_REGEX.is_match(alias) {
        return Ok(());
    }

    Err(AppError::alias_invalid_format(
        "Alias must be 3-30 characters of letters, digits, hyphens or underscores",
        json!({ "alias": alias, "provided_length": alias.chars().count() }),
    ))
}

/// Decides whether a caller may claim a custom alias as a slug.
pub struct AliasPolicy<R: UrlRepository + ?Sized = dyn UrlRepository> {
    repository: Arc<R>,
}

impl<R: UrlRepository + ?Sized> AliasPolicy<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validates `alias` for `caller` and returns the slug to use.
    ///
    /// Checks run in order: authentication, format, reserved words, existing
    /// use. The alias is trimmed first and the trimmed value is returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::AliasRequiresAuth`] if the caller is anonymous
    /// - [`AppError::AliasInvalidFormat`] if the alias shape is wrong
    /// - [`AppError::AliasReserved`] if the alias is a reserved route
    /// - [`AppError::AliasAlreadyInUse`] if a live record already has this slug
    /// - [`AppError::Internal`] on storage errors
    pub async fn validate(&self, alias: &str, caller: &CallerIdentity) -> Result<String, AppError> {
        if !caller.is_authenticated() {
            return Err(AppError::alias_requires_auth(
                "Custom aliases require authentication",
                json!({ "alias": alias }),
            ));
        }

        let alias = alias.trim();
        check_alias_format(alias)?;

        if is_reserved(alias) {
            return Err(AppError::alias_reserved(
                "This alias is reserved",
                json!({ "alias": alias }),
            ));
        }

        if self.repository.find_by_slug(alias).await?.is_some() {
            return Err(AppError::alias_already_in_use(
                "Alias is already in use",
                json!({ "alias": alias }),
            ));
        }

        Ok(alias.to_string())
    }
}
