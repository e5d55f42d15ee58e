//! Constraint enforcement.
//!
//! Checks run in a fixed order and the first violation wins:
//! required-field presence, then domain conformance, then primary-key
//! uniqueness (committed and batch-local), then unique-field values.
//! The violation names the field and the rule broken.

use crate::schema::{value, Row, TableSchema};

use super::errors::ConstraintViolation;
use super::RowIndex;

/// Validates one row against its table's constraints.
pub fn enforce_row(
    schema: &TableSchema,
    row: &Row,
    committed: &RowIndex,
    batch: &RowIndex,
) -> Result<(), ConstraintViolation> {
    for field in &schema.fields {
        match row.get(field.name) {
            Some(v) => {
                value::check(field.domain, v).map_err(|reason| {
                    ConstraintViolation::DomainViolation {
                        entity: schema.entity,
                        field: field.name,
                        reason,
                    }
                })?;
            }
            None if field.required => {
                return Err(ConstraintViolation::MissingField {
                    entity: schema.entity,
                    field: field.name,
                });
            }
            None => {}
        }
    }

    // Key fields are required, so after the presence pass the key is
    // extractable; the fallback covers composite keys with a non-integer
    // half, which the domain pass already rejected.
    let key = match row.key(schema) {
        Some(key) => key,
        None => {
            return Err(ConstraintViolation::MissingField {
                entity: schema.entity,
                field: schema.primary_key.first_field(),
            });
        }
    };
    if committed.contains_key(schema.entity, &key) || batch.contains_key(schema.entity, &key) {
        return Err(ConstraintViolation::DuplicateKey {
            entity: schema.entity,
            key,
        });
    }

    for &field in &schema.unique_fields {
        if let Some(v) = row.get(field) {
            let text = v.to_string();
            if committed.contains_unique(schema.entity, field, &text)
                || batch.contains_unique(schema.entity, field, &text)
            {
                return Err(ConstraintViolation::DuplicateValue {
                    entity: schema.entity,
                    field,
                    value: text,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Catalog, EntityType, Key, Value};

    fn user_row(uid: i64, name: &str, email: &str) -> Row {
        let mut row = Row::new();
        row.set("uid", Value::Int(uid));
        row.set("u_name", Value::Text(name.into()));
        row.set("email", Value::Text(email.into()));
        row
    }

    #[test]
    fn test_valid_row_passes() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let row = user_row(1, "alice", "alice@example.com");
        assert!(enforce_row(schema, &row, &RowIndex::new(), &RowIndex::new()).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let mut row = Row::new();
        row.set("uid", Value::Int(1));
        row.set("u_name", Value::Text("alice".into()));
        let err = enforce_row(schema, &row, &RowIndex::new(), &RowIndex::new()).unwrap_err();
        assert_eq!(
            err,
            ConstraintViolation::MissingField {
                entity: EntityType::User,
                field: "email"
            }
        );
    }

    #[test]
    fn test_domain_violation_names_field() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let mut row = Row::new();
        row.set("mid", Value::Int(5));
        row.set("uid", Value::Int(7));
        row.set("rating", Value::Int(9));
        let err = enforce_row(schema, &row, &RowIndex::new(), &RowIndex::new()).unwrap_err();
        match err {
            ConstraintViolation::DomainViolation { field, .. } => assert_eq!(field, "rating"),
            other => panic!("expected domain violation, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_key_against_committed() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let mut committed = RowIndex::new();
        committed.insert_key(EntityType::User, Key::Id(1));
        let row = user_row(1, "alice", "alice@example.com");
        let err = enforce_row(schema, &row, &committed, &RowIndex::new()).unwrap_err();
        assert_eq!(
            err,
            ConstraintViolation::DuplicateKey {
                entity: EntityType::User,
                key: Key::Id(1)
            }
        );
    }

    #[test]
    fn test_duplicate_composite_key_in_batch() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Review);
        let mut batch = RowIndex::new();
        batch.insert_key(EntityType::Review, Key::Pair(5, 7));
        let mut row = Row::new();
        row.set("mid", Value::Int(5));
        row.set("uid", Value::Int(7));
        row.set("rating", Value::Int(4));
        let err = enforce_row(schema, &row, &RowIndex::new(), &batch).unwrap_err();
        assert_eq!(
            err,
            ConstraintViolation::DuplicateKey {
                entity: EntityType::Review,
                key: Key::Pair(5, 7)
            }
        );
    }

    #[test]
    fn test_duplicate_username() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::User);
        let mut committed = RowIndex::new();
        committed.insert_row(schema, &user_row(1, "alice", "a@example.com"));
        let row = user_row(2, "alice", "other@example.com");
        let err = enforce_row(schema, &row, &committed, &RowIndex::new()).unwrap_err();
        assert_eq!(
            err,
            ConstraintViolation::DuplicateValue {
                entity: EntityType::User,
                field: "u_name",
                value: "alice".into()
            }
        );
    }

    #[test]
    fn test_optional_field_absent_is_fine() {
        let catalog = Catalog::new();
        let schema = catalog.describe(EntityType::Actor);
        let mut row = Row::new();
        row.set("uid", Value::Int(3));
        row.set("name", Value::Text("Jane Doe".into()));
        assert!(enforce_row(schema, &row, &RowIndex::new(), &RowIndex::new()).is_ok());
    }
}
