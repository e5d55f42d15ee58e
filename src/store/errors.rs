//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of the persistence collaborators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot serve requests (e.g. a poisoned lock)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// An underlying read or write failed
    #[error("store i/o failure: {0}")]
    Io(String),

    /// A persisted table could not be decoded
    #[error("corrupt store data: {0}")]
    Corrupt(String),
}
