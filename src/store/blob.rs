//! Blob store for poster images.
//!
//! Posters live outside the relational tables, keyed by filename; the
//! POSTER row holds the filename reference. Stored names are derived
//! from the movie id so re-uploads land on the same blob.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use super::errors::{StoreError, StoreResult};

/// Upload extensions accepted for poster images
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// The stored blob name for a movie's poster
pub fn poster_filename(mid: i64) -> String {
    format!("{:08x}.png", mid)
}

/// Whether an uploaded filename carries an accepted image extension
pub fn allowed_image_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty() && IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

/// Blob storage keyed by filename
pub trait BlobStore: Send + Sync {
    /// Stores the bytes under `filename`, replacing any existing blob
    fn store(&self, filename: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Whether a blob with this name exists
    fn exists(&self, filename: &str) -> StoreResult<bool>;

    /// Deletes the blob; removing a name that does not exist is not an
    /// error
    fn remove(&self, filename: &str) -> StoreResult<()>;
}

/// Filesystem blob store rooted at a poster directory
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl BlobStore for LocalBlobStore {
    fn store(&self, filename: &str, bytes: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::write(self.root.join(filename), bytes).map_err(|e| StoreError::Io(e.to_string()))
    }

    fn exists(&self, filename: &str) -> StoreResult<bool> {
        Ok(self.root.join(filename).exists())
    }

    fn remove(&self, filename: &str) -> StoreResult<()> {
        match fs::remove_file(self.root.join(filename)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }
}

/// In-memory blob store for tests
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn store(&self, filename: &str, bytes: &[u8]) -> StoreResult<()> {
        self.blobs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?
            .insert(filename.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, filename: &str) -> StoreResult<bool> {
        Ok(self
            .blobs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?
            .contains_key(filename))
    }

    fn remove(&self, filename: &str) -> StoreResult<()> {
        self.blobs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?
            .remove(filename);
        Ok(())
    }
}
