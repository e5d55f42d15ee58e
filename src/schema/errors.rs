//! # Schema Errors
//!
//! Errors raised before any row of a request is examined: an entity
//! name outside the fixed set, or a bulk header that does not match
//! the catalog's declared field list.

use thiserror::Error;

use super::types::EntityType;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema-level errors, terminal for the whole request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Entity name outside the fixed set of nine
    #[error("unknown entity type '{0}'")]
    UnknownEntityType(String),

    /// Bulk header line does not equal the declared field list
    #[error("header mismatch for {entity}: expected '{expected}', got '{found}'")]
    HeaderMismatch {
        entity: EntityType,
        expected: String,
        found: String,
    },
}
