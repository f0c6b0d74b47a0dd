//! Snapshot Persistence
//!
//! Whole-tree snapshots stored as blobs under a fixed key.

use std::collections::HashMap;
use std::path::PathBuf;

use super::types::FsError;

/// Key the explorer tree is stored under
pub const SNAPSHOT_KEY: &str = "virtualFileSystem";

/// Key-value blob store holding serialized trees.
pub trait SnapshotStore: Send {
    /// Load the blob for `key`, `Ok(None)` if nothing was ever saved
    fn load(&self, key: &str) -> Result<Option<String>, FsError>;

    /// Replace the blob for `key`
    fn save(&mut self, key: &str, blob: &str) -> Result<(), FsError>;
}

/// In-memory blob store.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    blobs: HashMap<String, String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one blob
    pub fn with_blob(key: &str, blob: impl Into<String>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.to_string(), blob.into());
        Self { blobs }
    }

    pub fn blob(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(|s| s.as_str())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, FsError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), FsError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Blob store writing one `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, FsError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::Persistence {
                message: format!("{}: {}", path.display(), e),
            }),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), FsError> {
        let path = self.path_for(key);
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(&path, blob))
            .map_err(|e| FsError::Persistence {
                message: format!("{}: {}", path.display(), e),
            })
    }
}
