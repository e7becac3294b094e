//! Application error type and its HTTP mapping.
//!
//! Every core operation returns [`AppError`]. Storage failures are classified
//! here so that no raw `sqlx::Error` ever reaches a caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload rendered in every non-2xx JSON response.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the link and snippet engine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is empty or malformed. Raised before any store access.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No record matches the requested code or id.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Snippet decryption failed: missing key, wrong key or corrupt ciphertext.
    #[error("{message}")]
    InvalidKey { message: String, details: Value },

    /// Store-level unique violation on `short_code`.
    ///
    /// Creation paths retry on this variant; it is never shown to clients
    /// as a creation failure.
    #[error("{message}")]
    DuplicateCode { message: String, details: Value },

    /// A caller-chosen value collides with an existing record.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn invalid_key(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidKey {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_code(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateCode {
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

    /// Returns true for the unique-violation variant raised by the store.
    pub fn is_duplicate_code(&self) -> bool {
        matches!(self, Self::DuplicateCode { .. })
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::InvalidKey { .. } => (StatusCode::UNAUTHORIZED, "invalid_key"),
            AppError::DuplicateCode { .. } | AppError::Conflict { .. } => {
                (StatusCode::CONFLICT, "conflict")
            }
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.parts();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::InvalidKey { message, details }
            | AppError::DuplicateCode { message, details }
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
        let (status, _) = self.parts();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::duplicate_code(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();

        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": fields, "errors": errors.to_string() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = AppError::not_found("Short link not found", json!({ "code": "abc123" }));
        assert_eq!(err.to_string(), "Short link not found");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::bad_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::invalid_key("x", json!({})), StatusCode::UNAUTHORIZED),
            (AppError::conflict("x", json!({})), StatusCode::CONFLICT),
            (AppError::internal("x", json!({})), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_error_info_code() {
        let info = AppError::invalid_key("Invalid secret key", json!({})).to_error_info();
        assert_eq!(info.code, "invalid_key");
        assert_eq!(info.message, "Invalid secret key");
    }

    #[test]
    fn test_is_duplicate_code() {
        assert!(AppError::duplicate_code("dup", json!({})).is_duplicate_code());
        assert!(!AppError::conflict("dup", json!({})).is_duplicate_code());
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
