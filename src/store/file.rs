//! File-backed store.
//!
//! All nine tables live in one JSON document. A commit stages the new
//! document beside the data file and renames it into place, so after a
//! crash the file holds either the whole batch or none of it. The
//! in-memory copy is replaced only after the rename succeeds.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::schema::{Catalog, EntityType, Key, Row};

use super::errors::{StoreError, StoreResult};
use super::{Store, TableBatch};

type Tables = HashMap<EntityType, BTreeMap<Key, Row>>;

/// On-disk layout: rows per table, keys rebuilt from the catalog on load
type Persisted = BTreeMap<EntityType, Vec<Row>>;

/// JSON-file-backed table set with staged-rename commits
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    catalog: Catalog,
    tables: RwLock<Tables>,
}

impl FileStore {
    /// Opens the store at `path`, loading any existing data file.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let catalog = Catalog::new();
        let tables = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| StoreError::Io(e.to_string()))?;
            let persisted: Persisted = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            rebuild(&catalog, persisted)?
        } else {
            Tables::new()
        };
        Ok(Self {
            path,
            catalog,
            tables: RwLock::new(tables),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }

    /// Writes the document to a staging file and renames it into place.
    fn persist(&self, tables: &Tables) -> StoreResult<()> {
        let persisted: Persisted = tables
            .iter()
            .map(|(entity, table)| (*entity, table.values().cloned().collect()))
            .collect();
        let bytes = serde_json::to_vec_pretty(&persisted)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let staging = self.path.with_extension("staging");
        fs::write(&staging, bytes).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

fn rebuild(catalog: &Catalog, persisted: Persisted) -> StoreResult<Tables> {
    let mut tables = Tables::new();
    for (entity, rows) in persisted {
        let schema = catalog.describe(entity);
        let table: &mut BTreeMap<Key, Row> = tables.entry(entity).or_default();
        for row in rows {
            let key = row
                .key(schema)
                .ok_or_else(|| StoreError::Corrupt(format!("{}: row without key", entity)))?;
            table.insert(key, row);
        }
    }
    Ok(tables)
}

impl Store for FileStore {
    fn exists(&self, entity: EntityType, key: &Key) -> StoreResult<bool> {
        Ok(self
            .read()?
            .get(&entity)
            .is_some_and(|table| table.contains_key(key)))
    }

    fn get(&self, entity: EntityType, key: &Key) -> StoreResult<Option<Row>> {
        Ok(self
            .read()?
            .get(&entity)
            .and_then(|table| table.get(key).cloned()))
    }

    fn keys(&self, entity: EntityType) -> StoreResult<Vec<Key>> {
        Ok(self
            .read()?
            .get(&entity)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default())
    }

    fn scan(&self, entity: EntityType) -> StoreResult<Vec<Row>> {
        Ok(self
            .read()?
            .get(&entity)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    fn commit(&self, batches: &[TableBatch]) -> StoreResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        // Apply to a working copy first; memory changes only if the
        // rename lands, so memory and disk never diverge.
        let mut next = tables.clone();
        for (entity, rows) in batches {
            let schema = self.catalog.describe(*entity);
            let table = next.entry(*entity).or_default();
            for row in rows {
                let key = row
                    .key(schema)
                    .ok_or_else(|| StoreError::Corrupt(format!("{}: row without key", entity)))?;
                table.insert(key, row.clone());
            }
        }
        self.persist(&next)?;
        *tables = next;
        Ok(())
    }
}
