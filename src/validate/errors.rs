//! # Validation Errors
//!
//! Per-row failures. Each names the entity, the field or key involved,
//! and the rule broken, so batch reports can list every faulty line.

use thiserror::Error;

use crate::schema::{EntityType, Key};

/// A row that breaks a structural or uniqueness constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// A required field has no value
    #[error("{entity}: missing required field '{field}'")]
    MissingField {
        entity: EntityType,
        field: &'static str,
    },

    /// A value falls outside its field's domain
    #[error("{entity}: field '{field}' out of domain: {reason}")]
    DomainViolation {
        entity: EntityType,
        field: &'static str,
        reason: String,
    },

    /// The primary key (single or composite) is already taken
    #[error("{entity}: duplicate key {key}")]
    DuplicateKey { entity: EntityType, key: Key },

    /// A unique non-key field value is already taken
    #[error("{entity}: duplicate value '{value}' for unique field '{field}'")]
    DuplicateValue {
        entity: EntityType,
        field: &'static str,
        value: String,
    },
}

/// A non-null foreign key that matches no committed or batch-local row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}: field '{field}' references {target} {value}, which does not exist")]
pub struct UnresolvedReference {
    pub entity: EntityType,
    pub field: &'static str,
    pub target: EntityType,
    pub value: i64,
}
