//! Error types for bookshelf
//!
//! Three layers, from the inside out: [`StoreError`] for record store
//! backends, [`CatalogError`] for the composite resolver, [`ApiError`] for
//! the HTTP surface. Missing records are not errors at the store layer;
//! lookups return `Option` and each caller decides what absence means.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Record store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert collided with an existing primary key (book ISBN).
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (database file or parent directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Composite resolver failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request rejected before touching the store (empty required field,
    /// unknown reference in strict mode).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Insert collided with an existing book ISBN.
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    /// The store contradicted itself: a record inserted during natural-key
    /// resolution could not be read back, or a strict-mode listing found a
    /// dangling reference.
    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    /// Record store failure.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(key) => CatalogError::Duplicate(key),
            other => CatalogError::Store(other),
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Duplicate key conflict (409)
    #[error("Conflict: {0}")]
    DuplicateKey(String),

    /// Store inconsistency surfaced by the resolver (500)
    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    /// Record store failure (500)
    #[error("Store error: {0}")]
    Store(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            CatalogError::Duplicate(key) => ApiError::DuplicateKey(key),
            CatalogError::ResolutionFailed(msg) => ApiError::ResolutionFailed(msg),
            CatalogError::Store(err) => ApiError::Store(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION", msg),
            ApiError::DuplicateKey(key) => (
                StatusCode::CONFLICT,
                "DUPLICATE_KEY",
                format!("duplicate key: {}", key),
            ),
            ApiError::ResolutionFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "RESOLUTION_FAILED", msg)
            }
            ApiError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", msg),
        };

        if status.is_server_error() {
            error!("Request failed: {} {}", error_code, message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
