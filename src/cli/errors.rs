//! # CLI Errors

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ServiceError;
use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Failures of CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The entity name is not one of the nine tables
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Opening the data directory failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The requested operation failed
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The batch was rejected; the issues were printed above
    #[error("batch rejected with {0} issue(s)")]
    Rejected(usize),
}
