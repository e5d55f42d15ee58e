//! # Ingestion Errors

use thiserror::Error;

use crate::access::Operation;
use crate::schema::SchemaError;
use crate::store::StoreError;

use super::report::RowIssue;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, BatchError>;

/// Failures of an ingestion request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Header or entity-name failure; terminal before any row is read
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// One or more rows failed validation; nothing was committed
    #[error("batch rejected with {} issue(s)", .0.len())]
    Rejected(Vec<RowIssue>),

    /// The persistent store failed; the batch was not committed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The supplied grant does not authorize this entry path
    #[error("grant for '{0}' does not cover this entry path")]
    Grant(Operation),
}
