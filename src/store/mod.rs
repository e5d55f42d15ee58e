//! # Persistent Store
//!
//! The committed-state collaborator. The ingestion engine treats the
//! store as the single source of truth for "already committed" rows;
//! `commit` must make all rows of a call visible or none of them, and
//! no reader may observe a partially applied commit.

pub mod blob;
pub mod errors;
pub mod file;
pub mod memory;

pub use blob::{allowed_image_name, poster_filename, BlobStore, LocalBlobStore, MemoryBlobStore};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::schema::{EntityType, Key, Row};

/// A batch of validated rows for one table, ready to commit
pub type TableBatch = (EntityType, Vec<Row>);

/// Storage operations the ingestion and browse paths depend on
pub trait Store: Send + Sync {
    /// Whether a row with this key exists
    fn exists(&self, entity: EntityType, key: &Key) -> StoreResult<bool>;

    /// Fetch one row by primary key
    fn get(&self, entity: EntityType, key: &Key) -> StoreResult<Option<Row>>;

    /// All primary keys of a table, for uniqueness snapshots
    fn keys(&self, entity: EntityType) -> StoreResult<Vec<Key>>;

    /// All rows of a table in key order, for browsing and snapshots
    fn scan(&self, entity: EntityType) -> StoreResult<Vec<Row>>;

    /// Commit every batch atomically: all rows become visible or none
    fn commit(&self, batches: &[TableBatch]) -> StoreResult<()>;
}
