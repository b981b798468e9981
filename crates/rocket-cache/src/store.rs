//! Raw string key-value stores.
//!
//! A [`KeyValueStore`] holds opaque string blobs under string keys, the same
//! contract a browser's `localStorage` offers. Two backends are provided:
//! [`MemoryStore`] for tests and embedding, and [`FileStore`] which mirrors
//! every write to a JSON file so values survive a process restart.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashmap::DashMap;

use crate::CacheError;

/// A synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value stored under `key`.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Delete the value under `key`. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }

    /// List all keys, sorted.
    fn keys(&self) -> Result<Vec<String>, CacheError>;
}

/// In-memory store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.entries.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.entries.contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}

/// File-backed store.
///
/// The whole map is kept in memory and rewritten to disk on every mutation.
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a crash mid-write never leaves a truncated file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing or empty file is treated as an empty store. A file that does
    /// not parse is renamed to `<name>.corrupt` and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CacheError::OpenError(format!("{}: {}", parent.display(), e))
                })?;
            }
        }

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                match serde_json::from_str(&content) {
                    Ok(entries) => entries,
                    Err(error) => {
                        set_aside(&path, &error);
                        BTreeMap::new()
                    }
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, CacheError> {
        self.entries
            .lock()
            .map_err(|_| CacheError::StoreError("store lock poisoned".to_string()))
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let tmp = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Move an unparseable store file out of the way so the next flush starts clean.
fn set_aside(path: &Path, error: &serde_json::Error) {
    let backup = path.with_extension("corrupt");
    match fs::rename(path, &backup) {
        Ok(()) => tracing::warn!(
            path = %path.display(),
            backup = %backup.display(),
            %error,
            "store file unreadable, starting empty"
        ),
        Err(rename_error) => tracing::warn!(
            path = %path.display(),
            %error,
            %rename_error,
            "store file unreadable and could not be moved, starting empty"
        ),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.lock()?;
        let previous = entries.insert(key.to_string(), value.to_string());

        // Roll back so memory never runs ahead of disk.
        if let Err(e) = self.flush(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.lock()?;
        if let Some(old) = entries.remove(key) {
            if let Err(e) = self.flush(&entries) {
                entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_memory_store_delete_and_exists() {
        let store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        assert!(store.exists("a").unwrap());

        store.delete("a").unwrap();
        assert!(!store.exists("a").unwrap());

        // Deleting twice is fine
        store.delete("a").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["b".to_string()]);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("@RocketShoes:cart", "[]").unwrap();
            store.set("other", "x").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("@RocketShoes:cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            store.keys().unwrap(),
            vec!["@RocketShoes:cart".to_string(), "other".to_string()]
        );
    }

    #[test]
    fn test_file_store_delete_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        store.delete("k").unwrap();
        drop(store);

        let store = FileStore::open(&path).unwrap();
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn test_file_store_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_sets_aside_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"@RocketShoes:cart": [trunc"#).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.keys().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("storage.corrupt")).unwrap(),
            r#"{"@RocketShoes:cart": [trunc"#
        );

        store.set("k", "v").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("v".to_string()));
    }
}
