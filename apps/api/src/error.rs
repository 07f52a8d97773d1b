//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Comercio                               │
//! │                                                                         │
//! │  Handler: Result<_, ApiError>                                          │
//! │         │                                                               │
//! │         ├── JSON body rejected ───────────────► 400 VALIDATION_ERROR   │
//! │         ├── DbError::Domain (validation,                               │
//! │         │   missing parent, dependents) ──────► 400 VALIDATION_ERROR   │
//! │         ├── DbError::NotFound ─────────────────► 404 NOT_FOUND          │
//! │         ├── DbError::OperationFailed ─────────► 400 OPERATION_FAILED   │
//! │         └── anything else ────────────────────► 500 INTERNAL           │
//! │                                                                         │
//! │  Body: {"code": "NOT_FOUND", "message": "Product with PID … not found"}│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use comercio_db::DbError;
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Company with PID 3f1e… not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation or integrity rule failed (400)
    ValidationError,

    /// Store failure hidden behind a generic message (400)
    OperationFailed,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::OperationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            DbError::Domain(e) => ApiError::validation(e.to_string()),
            DbError::OperationFailed(message) => {
                ApiError::new(ErrorCode::OperationFailed, message)
            }
            other => {
                // Log the actual error but return a generic message
                tracing::error!("Database error outside entity manager: {}", other);
                ApiError::internal("Database operation failed")
            }
        }
    }
}

/// Malformed JSON, wrong types and unknown fields.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Response serialization failed: {}", err);
        ApiError::internal("Failed to serialize response")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use comercio_core::{CoreError, ValidationError};

    #[test]
    fn test_not_found_maps_to_404() {
        let err: ApiError = DbError::not_found("Product", "abc").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Product with PID abc not found");
    }

    #[test]
    fn test_domain_errors_map_to_400() {
        let err: ApiError = DbError::from(CoreError::HasDependents {
            entity: "company".to_string(),
            dependents: "products".to_string(),
        })
        .into();
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = DbError::from(ValidationError::Required {
            field: "name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "name is required");
    }

    #[test]
    fn test_generic_failure_keeps_its_message() {
        let err: ApiError = DbError::OperationFailed("Error creating product".to_string()).into();
        assert_eq!(err.code.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Error creating product");
    }

    #[test]
    fn test_other_db_errors_are_internal() {
        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_value(ApiError::validation("bad")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "bad");
    }
}
