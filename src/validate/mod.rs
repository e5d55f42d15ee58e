//! # Row Validation
//!
//! Constraint enforcement and foreign-key resolution. Both checks are
//! pure: they read a row against two indexes (committed state and the
//! rows accepted so far in the current batch) and never write.

pub mod enforcer;
pub mod errors;
pub mod referential;

pub use enforcer::enforce_row;
pub use errors::{ConstraintViolation, UnresolvedReference};
pub use referential::resolve_foreign_keys;

use std::collections::{HashMap, HashSet};

use crate::schema::{EntityType, Key, Row, TableSchema};

/// Index over a set of rows: primary keys plus unique-field values.
///
/// Two instances drive a batch: one snapshot of committed state taken
/// at the start of validation, and one batch-local index that grows as
/// rows are accepted, so later rows may reference earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RowIndex {
    keys: HashMap<EntityType, HashSet<Key>>,
    uniques: HashMap<(EntityType, &'static str), HashSet<String>>,
}

impl RowIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key
    pub fn insert_key(&mut self, entity: EntityType, key: Key) {
        self.keys.entry(entity).or_default().insert(key);
    }

    /// Records a row's key and unique-field values
    pub fn insert_row(&mut self, schema: &TableSchema, row: &Row) {
        if let Some(key) = row.key(schema) {
            self.insert_key(schema.entity, key);
        }
        for &field in &schema.unique_fields {
            if let Some(value) = row.get(field) {
                self.uniques
                    .entry((schema.entity, field))
                    .or_default()
                    .insert(value.to_string());
            }
        }
    }

    pub fn contains_key(&self, entity: EntityType, key: &Key) -> bool {
        self.keys.get(&entity).is_some_and(|set| set.contains(key))
    }

    pub fn contains_unique(&self, entity: EntityType, field: &'static str, value: &str) -> bool {
        self.uniques
            .get(&(entity, field))
            .is_some_and(|set| set.contains(value))
    }
}
