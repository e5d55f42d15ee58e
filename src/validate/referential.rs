//! Foreign-key resolution.
//!
//! Each non-null foreign-key value must match the primary key of a row
//! in the target table, looked up first in the batch-local index (rows
//! accepted earlier in the same ingestion) and then in the committed
//! snapshot. Absent optional references always pass.

use crate::schema::{Key, Row, TableSchema};

use super::errors::UnresolvedReference;
use super::RowIndex;

/// Resolves every foreign key of one row.
pub fn resolve_foreign_keys(
    schema: &TableSchema,
    row: &Row,
    committed: &RowIndex,
    batch: &RowIndex,
) -> Result<(), UnresolvedReference> {
    for fk in &schema.foreign_keys {
        if let Some(value) = row.get_int(fk.field) {
            let key = Key::Id(value);
            if !batch.contains_key(fk.target, &key) && !committed.contains_key(fk.target, &key) {
                return Err(UnresolvedReference {
                    entity: schema.entity,
                    field: fk.field,
                    target: fk.target,
                    value,
                });
            }
        }
    }
    Ok(())
}
