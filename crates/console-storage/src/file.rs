//! JSON-file-backed credential storage.

use crate::{CredentialStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Credential storage persisted as a single JSON object on disk.
///
/// Reads are served from the in-memory map; every mutation rewrites the whole
/// file. A missing file reads as an empty map.
pub struct FileStorage {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file at `path`, loading its current contents.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let cache = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content).map_err(|e| StorageError::Encoding(e.to_string()))?
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), entries = cache.len(), "Opened credential storage");

        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    fn persist(&self, cache: &HashMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(cache).map_err(|e| StorageError::Encoding(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CredentialStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut cache = self.cache.lock().unwrap();
        cache.insert(key.to_string(), value.to_string());
        self.persist(&cache)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let cache = self.cache.lock().unwrap();
        Ok(cache.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut cache = self.cache.lock().unwrap();
        let was_present = cache.remove(key).is_some();
        if was_present {
            self.persist(&cache)?;
        }
        Ok(was_present)
    }
}
