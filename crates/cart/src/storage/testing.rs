//! Test-only storage wrappers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{KeyValueStore, MemoryStore, StorageError};

/// Wraps a [`MemoryStore`] and holds every `get` open after it has read its
/// value, until the test calls [`release`](Self::release).
#[derive(Debug, Clone)]
pub(crate) struct GatedStore {
    inner: MemoryStore,
    read: Arc<Notify>,
    gate: Arc<Notify>,
    released: Arc<AtomicUsize>,
}

impl GatedStore {
    pub(crate) fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            read: Arc::new(Notify::new()),
            gate: Arc::new(Notify::new()),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait until a `get` has read its value and is parked at the gate.
    pub(crate) async fn wait_for_read(&self) {
        self.read.notified().await;
    }

    /// Let the parked `get` return.
    pub(crate) fn release(&self) {
        self.gate.notify_one();
    }

    /// Number of `get` calls that have passed the gate.
    pub(crate) fn reads_released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.inner.get(key).await?;
        self.read.notify_one();
        self.gate.notified().await;
        self.released.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}
