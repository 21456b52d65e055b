//! Persistent key-value storage for cart snapshots.
//!
//! The cart only needs string values under string keys, read and written
//! asynchronously. [`KeyValueStore`] is that seam; backends:
//!
//! - [`MemoryStore`] - process-local map, for tests and embedders without
//!   durable storage
//! - [`FileStore`] - a single JSON file on disk, surviving restarts

mod file;
mod memory;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing data exists but cannot be read as a key-value map.
    #[error("Corrupt storage: {0}")]
    Corrupt(String),

    /// The backend is temporarily unreachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store.
///
/// Implementations must be safe to share across tasks. A `set` that
/// returns `Ok` must be visible to every later `get` on the same store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage keys used by the cart.
pub mod keys {
    /// Separator between the namespace and the key.
    pub const SEPARATOR: char = ':';

    /// Key for the serialized cart line items.
    pub const PRODUCTS: &str = "products";

    /// Prefix a key with the application namespace, e.g. `@GoMarketplace:products`.
    #[must_use]
    pub fn namespaced(namespace: &str, key: &str) -> String {
        format!("{namespace}{SEPARATOR}{key}")
    }
}
