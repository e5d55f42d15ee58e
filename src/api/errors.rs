//! # Service Errors

use thiserror::Error;

use crate::access::AccessError;
use crate::ingest::BatchError;
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures of the operation surface
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller's roles do not cover the operation
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The underlying entry request was rejected
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// The persistent store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No movie with this id exists
    #[error("no movie with id {0}")]
    MovieNotFound(i64),

    /// The uploaded filename is not an accepted image type
    #[error("unsupported image filename '{0}'")]
    UnsupportedImage(String),
}
