//! Typed cache wrapper with automatic serialization.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::store::{FileStore, KeyValueStore, MemoryStore};
use crate::CacheError;

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap; clones share the
/// same underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    /// Wrap an existing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Open a fresh in-memory cache.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Open a file-backed cache at `path`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open("/tmp/rocket/storage.json")?;
    /// ```
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, CacheError> {
        Ok(Self::new(Arc::new(FileStore::open(path)?)))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// blob does not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    /// Get the raw stored string without decoding.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}
