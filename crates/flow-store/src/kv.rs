//! Key-value document stores.
//!
//! Values are JSON text. [`FileStore`] keeps one file per key and replaces
//! files atomically; [`MemoryStore`] backs tests.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

pub trait KeyValueStore: Send + Sync {
    /// The document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing storage cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing storage cannot be modified.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        tracing::debug!(key, bytes = value.len(), "document written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn docs(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.docs
            .lock()
            .map_err(|_| StoreError::Other(anyhow::anyhow!("memory store lock poisoned")))
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.docs()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.docs()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.docs()?.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.read("audits").unwrap(), None);
        store.write("audits", "[]").unwrap();
        store.write("audits", "[1]").unwrap();
        assert_eq!(store.read("audits").unwrap().as_deref(), Some("[1]"));
        assert!(store.remove("audits").unwrap());
        assert!(!store.remove("audits").unwrap());
    }

    #[test]
    fn file_store_read_write_remove() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStore::open(dir.path().join("data")).unwrap());
    }

    #[test]
    fn memory_store_read_write_remove() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn file_store_uses_key_as_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.write("auditFindings.AUD-2025-001", "[]").unwrap();
        assert!(dir.path().join("auditFindings.AUD-2025-001.json").exists());
        assert!(!dir.path().join(".auditFindings.AUD-2025-001.json.tmp").exists());
    }
}
