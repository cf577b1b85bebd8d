//! API error types and response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_licenses::StoreError;
use core_sync::SyncError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error type for API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Lookup miss: unknown vendor, license, or company.
    #[error("{0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// Resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            SyncError::VendorNotFound(name) => {
                ApiError::NotFound(format!("Vendor '{}' not found", name))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Store(StoreError::NotFound { entity_type, id }) => (
                StatusCode::NOT_FOUND,
                format!("{} '{}' not found", entity_type, id),
            ),
            ApiError::Store(e) => {
                error!(error = %e, "Store error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal database error".to_string(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
