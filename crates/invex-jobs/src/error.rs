//! Job store error types.

use thiserror::Error;

/// Error that can occur in the job record store.
#[derive(Debug, Error)]
pub enum JobError {
    /// A submitted job document was not a JSON object.
    #[error("job document must be a JSON object")]
    NotAnObject,

    /// A submitted job document carried no `pk`.
    #[error("job document is missing the 'pk' field")]
    MissingKey,

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] invex_store::StoreError),
}

/// Result type for job store operations.
pub type JobResult<T> = Result<T, JobError>;
