//! Key-Value persistence for the RocketShoes cart.
//!
//! Provides a small storage contract modelled on browser `localStorage`
//! (string keys, string values) plus a typed JSON wrapper on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cache::Cache;
//!
//! let cache = Cache::open("/tmp/rocket/storage.json")?;
//!
//! // Store a value
//! cache.set("@RocketShoes:cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<Item>> = cache.get("@RocketShoes:cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
