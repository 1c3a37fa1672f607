//! Store error types.

use thiserror::Error;

/// Error that can occur at the document-store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document being written is not a JSON object.
    #[error("invalid document: {message}")]
    InvalidDocument { message: String },

    /// The backing engine failed.
    #[error("store backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Create an invalid-document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        StoreError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error with a source.
    pub fn backend_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
