//! In-memory store.
//!
//! The default engine backing and the test double. A single `RwLock`
//! over all tables makes every commit atomic with respect to readers.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use crate::schema::{Catalog, EntityType, Key, Row};

use super::errors::{StoreError, StoreResult};
use super::{Store, TableBatch};

type Tables = HashMap<EntityType, BTreeMap<Key, Row>>;

/// RwLock-protected in-memory table set
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: Catalog,
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))
    }
}

impl Store for MemoryStore {
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
        // Apply to a working copy; the live map is replaced only once
        // every row has a key, so a mid-batch failure leaves nothing
        // partially visible.
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
        *tables = next;
        Ok(())
    }
}
