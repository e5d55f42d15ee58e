//! Rows and keys.
//!
//! A row is a map from field name to typed value; absent optional
//! fields have no entry. Keys are extracted per the table's primary
//! key shape and are immutable once a row is committed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{PrimaryKey, TableSchema};
use super::value::Value;

/// Primary key of a row: a single id or an (mid, uid) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Id(i64),
    Pair(i64, i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Id(n) => write!(f, "{}", n),
            Key::Pair(a, b) => write!(f, "({}, {})", a, b),
        }
    }
}

/// One typed row of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, replacing any existing one
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn get_int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_int)
    }

    pub fn get_text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    pub fn get_date(&self, field: &str) -> Option<chrono::NaiveDate> {
        self.get(field).and_then(Value::as_date)
    }

    /// Extracts the primary key per the table's key shape.
    ///
    /// Returns `None` if a key field is absent or not an integer; the
    /// constraint enforcer reports that as a missing field.
    pub fn key(&self, schema: &TableSchema) -> Option<Key> {
        match schema.primary_key {
            PrimaryKey::Single(f) => self.get_int(f).map(Key::Id),
            PrimaryKey::Composite(a, b) => match (self.get_int(a), self.get_int(b)) {
                (Some(x), Some(y)) => Some(Key::Pair(x, y)),
                _ => None,
            },
        }
    }

    /// Renders the row as one tab-separated line in schema field order,
    /// absent fields as empty cells
    pub fn to_line(&self, schema: &TableSchema) -> String {
        schema
            .fields
            .iter()
            .map(|f| {
                self.get(f.name)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::Catalog;
    use crate::schema::types::EntityType;

    #[test]
    fn test_single_key_extraction() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let mut row = Row::new();
        row.set("uid", Value::Int(7));
        assert_eq!(row.key(schema), Some(Key::Id(7)));
    }

    #[test]
    fn test_composite_key_extraction() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let mut row = Row::new();
        row.set("mid", Value::Int(5));
        row.set("uid", Value::Int(7));
        assert_eq!(row.key(schema), Some(Key::Pair(5, 7)));
    }

    #[test]
    fn test_key_absent_when_field_missing() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let mut row = Row::new();
        row.set("mid", Value::Int(5));
        assert_eq!(row.key(schema), None);
    }

    #[test]
    fn test_to_line_keeps_field_order() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Actor);
        let mut row = Row::new();
        row.set("name", Value::Text("Jane Doe".into()));
        row.set("uid", Value::Int(3));
        // dob absent
        assert_eq!(row.to_line(schema), "3\tJane Doe\t");
    }
}
