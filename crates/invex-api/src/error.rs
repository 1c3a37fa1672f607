//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use invex_jobs::JobError;

/// Error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Requested record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The `timestamp` query parameter did not parse as RFC 3339.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Malformed request.
    #[error("validation error: {0}")]
    Validation(String),

    /// Job store failure.
    #[error(transparent)]
    Job(#[from] JobError),

    /// Connector framework failure.
    #[error("connector error: {0}")]
    Connector(#[from] invex_connector::error::ConnectorError),

    /// Document store failure.
    #[error("store error: {0}")]
    Store(#[from] invex_store::StoreError),
}

impl ApiError {
    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            ApiError::InvalidTimestamp(_) => {
                (StatusCode::BAD_REQUEST, "invalid_timestamp", self.to_string())
            }
            ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "validation_error", self.to_string())
            }
            ApiError::Job(JobError::MissingKey | JobError::NotAnObject) => {
                (StatusCode::BAD_REQUEST, "validation_error", self.to_string())
            }
            ApiError::Job(JobError::Store(e)) => {
                error!("Store error occurred: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "Internal store error".to_string(),
                )
            }
            ApiError::Connector(e) => {
                error!("Connector error occurred: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "connector_error",
                    "Internal connector error".to_string(),
                )
            }
            ApiError::Store(e) => {
                error!("Store error occurred: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "Internal store error".to_string(),
                )
            }
        };

        let body = json!({
            "error": error_type,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
