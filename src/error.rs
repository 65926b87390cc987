//! Application error type and its HTTP mapping.
//!
//! Every layer returns [`AppError`]. The variants mirror the failure kinds of
//! the URL lifecycle (URL validation, alias policy, ownership lookups, write
//! races) plus the generic request/infrastructure failures.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::url_validator::UrlValidationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload: `{"code", "message", "details"}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target URL is empty, unparsable, or not http/https.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    #[error("{message}")]
    AliasInvalidFormat { message: String, details: Value },

    #[error("{message}")]
    AliasReserved { message: String, details: Value },

    #[error("{message}")]
    AliasAlreadyInUse { message: String, details: Value },

    /// Custom aliases are only available to authenticated callers.
    #[error("{message}")]
    AliasRequiresAuth { message: String, details: Value },

    /// Request body failed shape validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Absent record, or a record the caller does not own.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique constraint violated at write time.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn alias_invalid_format(message: impl Into<String>, details: Value) -> Self {
        Self::AliasInvalidFormat {
            message: message.into(),
            details,
        }
    }

    pub fn alias_reserved(message: impl Into<String>, details: Value) -> Self {
        Self::AliasReserved {
            message: message.into(),
            details,
        }
    }

    pub fn alias_already_in_use(message: impl Into<String>, details: Value) -> Self {
        Self::AliasAlreadyInUse {
            message: message.into(),
            details,
        }
    }

    pub fn alias_requires_auth(message: impl Into<String>, details: Value) -> Self {
        Self::AliasRequiresAuth {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidUrl { .. } => (StatusCode::BAD_REQUEST, "invalid_url"),
            AppError::AliasInvalidFormat { .. } => {
                (StatusCode::BAD_REQUEST, "alias_invalid_format")
            }
            AppError::AliasReserved { .. } => (StatusCode::BAD_REQUEST, "alias_reserved"),
            AppError::AliasAlreadyInUse { .. } => {
                (StatusCode::BAD_REQUEST, "alias_already_in_use")
            }
            AppError::AliasRequiresAuth { .. } => {
                (StatusCode::BAD_REQUEST, "alias_requires_auth")
            }
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            AppError::InvalidUrl { message, details }
            | AppError::AliasInvalidFormat { message, details }
            | AppError::AliasReserved { message, details }
            | AppError::AliasAlreadyInUse { message, details }
            | AppError::AliasRequiresAuth { message, details }
            | AppError::Validation { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        AppError::invalid_url(e.to_string(), json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or(Value::Null);
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
