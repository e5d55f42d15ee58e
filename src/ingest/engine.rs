//! The ingestion engine.
//!
//! Every entry path funnels into one validation pass: parse issues,
//! constraint violations, and unresolved references are collected for
//! the whole request, and only an issue-free request reaches the
//! store's atomic commit. Accepted keys accumulate in a batch-local
//! index as validation proceeds, so a row may reference any row
//! accepted earlier in the same request; a forward reference fails.
//!
//! A mutex serializes validation-and-commit, so the committed snapshot
//! a request validates against cannot change under it. Requests with a
//! producer/consumer relationship across separate calls are sequenced
//! by the caller.

use std::collections::BTreeSet;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::access::{Grant, Operation};
use crate::schema::{Catalog, EntityType, Row};
use crate::store::{Store, StoreError, TableBatch};
use crate::validate::{enforce_row, resolve_foreign_keys, RowIndex};

use super::errors::{BatchError, IngestResult};
use super::parse::{parse_batch, parse_fields};
use super::report::{BatchReceipt, IssueKind, RowIssue};

/// One entity's worth of parsed rows awaiting validation
struct Staged {
    entity: EntityType,
    rows: Vec<(usize, Row)>,
    issues: Vec<RowIssue>,
}

/// The ingestion engine, bound to one store
pub struct Engine<S: Store> {
    catalog: Catalog,
    store: S,
    serial: Mutex<()>,
}

impl<S: Store> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            catalog: Catalog::new(),
            store,
            serial: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bulk-loads one tab-separated batch.
    pub fn ingest(&self, grant: &Grant, input: &str) -> IngestResult<BatchReceipt> {
        let mut receipts = self.ingest_all(&[(grant, input)])?;
        Ok(receipts.remove(0))
    }

    /// Bulk-loads several batches as one request.
    ///
    /// Batches are ordered by entity dependency before validation, so
    /// a set containing both a producer and its consumer (users, then
    /// admins referencing them) validates regardless of argument
    /// order. The whole set commits atomically or not at all.
    pub fn ingest_all(&self, batches: &[(&Grant, &str)]) -> IngestResult<Vec<BatchReceipt>> {
        let mut staged = Vec::with_capacity(batches.len());
        for (grant, input) in batches {
            let entity = bulk_entity(grant)?;
            let parsed = parse_batch(self.catalog.describe(entity), input)?;
            staged.push(Staged {
                entity,
                rows: parsed.rows,
                issues: parsed.issues,
            });
        }
        let committed = self.run(staged)?;
        Ok(committed
            .iter()
            .map(|(entity, rows)| BatchReceipt {
                entity: *entity,
                rows: rows.len(),
            })
            .collect())
    }

    /// Enters one row supplied as discrete field values.
    pub fn enter(&self, grant: &Grant, fields: &[(&str, &str)]) -> IngestResult<Row> {
        let mut rows = self.enter_all(&[(grant, fields)])?;
        Ok(rows.remove(0))
    }

    /// Enters several single rows as one atomic request (e.g. a user
    /// and its password row).
    pub fn enter_all(&self, entries: &[(&Grant, &[(&str, &str)])]) -> IngestResult<Vec<Row>> {
        let staged = self.stage_entries(entries)?;
        let committed = self.run(staged)?;
        Ok(committed.into_iter().flat_map(|(_, rows)| rows).collect())
    }

    /// Validates one single-entry row without committing it.
    ///
    /// Used where a side effect must land between validation and
    /// commit, such as storing a poster blob.
    pub fn check(&self, grant: &Grant, fields: &[(&str, &str)]) -> IngestResult<Row> {
        let staged = self.stage_entries(&[(grant, fields)])?;
        let _guard = self.lock()?;
        let mut validated = self.validate(staged)?;
        let (_, mut rows) = validated.remove(0);
        Ok(rows.remove(0))
    }

    fn stage_entries(&self, entries: &[(&Grant, &[(&str, &str)])]) -> IngestResult<Vec<Staged>> {
        let mut staged = Vec::with_capacity(entries.len());
        for (grant, fields) in entries {
            let entity = entry_entity(grant)?;
            let schema = self.catalog.describe(entity);
            match parse_fields(schema, fields) {
                Ok(row) => staged.push(Staged {
                    entity,
                    rows: vec![(1, row)],
                    issues: vec![],
                }),
                Err(reason) => staged.push(Staged {
                    entity,
                    rows: vec![],
                    issues: vec![RowIssue {
                        entity,
                        line: 1,
                        kind: IssueKind::Parse { reason },
                    }],
                }),
            }
        }
        Ok(staged)
    }

    /// Validates, then commits if clean. Holds the engine lock across
    /// both, so the snapshot a request validated against is the one it
    /// commits over.
    fn run(&self, staged: Vec<Staged>) -> IngestResult<Vec<TableBatch>> {
        let _guard = self.lock()?;
        let accepted = self.validate(staged)?;
        self.store.commit(&accepted)?;
        for (entity, rows) in &accepted {
            info!(entity = %entity, rows = rows.len(), "batch committed");
        }
        Ok(accepted)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.serial
            .lock()
            .map_err(|_| StoreError::Unavailable("engine lock poisoned".into()))
    }

    /// The pure validation pass: no writes, every issue collected.
    /// Callers hold the engine lock.
    fn validate(&self, mut staged: Vec<Staged>) -> IngestResult<Vec<TableBatch>> {
        // Dependency order; stable, so equal-ranked batches keep their
        // submission order.
        staged.sort_by_key(|s| s.entity.dependency_rank());

        let committed = self.snapshot(&staged)?;
        let mut batch_index = RowIndex::new();
        let mut issues = Vec::new();
        let mut accepted: Vec<TableBatch> = Vec::with_capacity(staged.len());

        for stage in staged {
            let schema = self.catalog.describe(stage.entity);
            issues.extend(stage.issues);
            let mut rows = Vec::with_capacity(stage.rows.len());
            for (line, row) in stage.rows {
                let outcome = enforce_row(schema, &row, &committed, &batch_index)
                    .map_err(IssueKind::Constraint)
                    .and_then(|_| {
                        resolve_foreign_keys(schema, &row, &committed, &batch_index)
                            .map_err(IssueKind::Reference)
                    });
                match outcome {
                    Ok(()) => {
                        batch_index.insert_row(schema, &row);
                        rows.push(row);
                    }
                    Err(kind) => issues.push(RowIssue {
                        entity: stage.entity,
                        line,
                        kind,
                    }),
                }
            }
            accepted.push((stage.entity, rows));
        }

        if !issues.is_empty() {
            warn!(issues = issues.len(), "batch rejected");
            return Err(BatchError::Rejected(issues));
        }
        Ok(accepted)
    }

    /// Snapshots committed keys (and unique values) for every entity a
    /// request touches: the batch entities plus their FK targets.
    fn snapshot(&self, staged: &[Staged]) -> IngestResult<RowIndex> {
        let mut wanted = BTreeSet::new();
        for stage in staged {
            wanted.insert(stage.entity);
            for fk in &self.catalog.describe(stage.entity).foreign_keys {
                wanted.insert(fk.target);
            }
        }
        let mut index = RowIndex::new();
        for entity in wanted {
            let schema = self.catalog.describe(entity);
            if schema.unique_fields.is_empty() {
                for key in self.store.keys(entity)? {
                    index.insert_key(entity, key);
                }
            } else {
                for row in self.store.scan(entity)? {
                    index.insert_row(schema, &row);
                }
            }
        }
        Ok(index)
    }
}

fn bulk_entity(grant: &Grant) -> IngestResult<EntityType> {
    match grant.operation() {
        Operation::BulkEntry(entity) => Ok(entity),
        op => Err(BatchError::Grant(op)),
    }
}

fn entry_entity(grant: &Grant) -> IngestResult<EntityType> {
    match grant.operation() {
        Operation::SingleEntry(entity) => Ok(entity),
        Operation::CreateReview => Ok(EntityType::Review),
        op => Err(BatchError::Grant(op)),
    }
}
