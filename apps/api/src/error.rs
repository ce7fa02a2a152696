//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kasir POS                              │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  DbError / CoreError / ValidationError / JsonRejection                 │
//! │         │   (From impls below)                                          │
//! │         ▼                                                               │
//! │  ApiError { code, message }                                            │
//! │         │   IntoResponse                                                │
//! │         ▼                                                               │
//! │  ┌──────────────────────┬────────┐                                     │
//! │  │ INVALID_INPUT        │  400   │                                     │
//! │  │ NOT_FOUND            │  404   │                                     │
//! │  │ INSUFFICIENT_STOCK   │  409   │                                     │
//! │  │ CONFLICT             │  409   │                                     │
//! │  │ SERVICE_UNAVAILABLE  │  503   │  (retryable storage failure)        │
//! │  │ STORAGE_FAILURE      │  500   │                                     │
//! │  │ INTERNAL             │  500   │                                     │
//! │  └──────────────────────┴────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage error details are logged, never sent to the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kasir_core::{CoreError, ErrorKind, ValidationError};
use kasir_db::DbError;
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for product 7: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
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
    /// Malformed or out-of-range input (400)
    InvalidInput,

    /// Resource not found (404)
    NotFound,

    /// Requested quantity exceeds stock (409)
    InsufficientStock,

    /// Concurrent modification or blocking reference (409)
    Conflict,

    /// Store temporarily unable to serve; retry later (503)
    ServiceUnavailable,

    /// Store failed (500)
    StorageFailure,

    /// Server-side bug (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InsufficientStock | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::StorageFailure | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InvalidInput => ErrorCode::InvalidInput,
            ErrorKind::InsufficientStock => ErrorCode::InsufficientStock,
            ErrorKind::Conflict => ErrorCode::Conflict,
            ErrorKind::StorageFailure => ErrorCode::StorageFailure,
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

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err.kind() {
            ErrorKind::StorageFailure if err.is_retryable() => {
                tracing::warn!(error = %err, "Storage temporarily unavailable");
                ApiError::new(
                    ErrorCode::ServiceUnavailable,
                    "Database is busy, please retry",
                )
            }
            ErrorKind::StorageFailure => {
                tracing::error!(error = %err, "Database operation failed");
                ApiError::new(ErrorCode::StorageFailure, "Database operation failed")
            }
            ErrorKind::Conflict if matches!(err, DbError::Conflict(_)) => {
                tracing::warn!(error = %err, "Concurrent modification");
                ApiError::new(
                    ErrorCode::Conflict,
                    "The store is busy with another change, please retry",
                )
            }
            kind => ApiError::new(kind.into(), err.to_string()),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(err.kind().into(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_input(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
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
