//! Durable key/value storage for client state

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{StoreError, StoreResult};

/// String key/value storage that survives process restarts
pub trait StateStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Durably store `value`; when this returns `Ok` the write is complete
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// One `<key>.json` file per key inside a state directory.
///
/// Writes go to a temporary file which is fsync'd and renamed over the
/// target, so readers see either the old or the new record.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStorage for FileStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!(".{}.json.tmp", key));
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;

        tracing::trace!(path = ?path, bytes = value.len(), "State written");
        Ok(())
    }
}

/// In-memory storage. Clones share the same entries, which lets a test
/// "restart" by building a second store over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
