//! The cart store: in-memory cart state written through to storage.
//!
//! State lives in a [`tokio::sync::watch`] channel. Each mutation runs inside
//! the channel's write lock against the live cart, so two operations issued
//! back to back can never compute from the same stale snapshot. Subscribers
//! are woken only when the cart actually changed.
//!
//! Writes are serialized through a single writer lock, and the snapshot is
//! taken while holding it. Whatever order concurrent writes finish in, the
//! last one always carries the newest cart.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use go_marketplace_core::{Cart, LineItem, Product, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Result of reading the stored snapshot at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing stored under the cart key.
    Empty,
    /// The stored snapshot replaced the in-memory cart.
    Restored {
        /// Number of line items restored.
        items: usize,
    },
    /// The stored snapshot was unreadable or broke a cart invariant and was ignored.
    Discarded,
    /// The cart was modified before the snapshot arrived; local state was kept.
    Superseded,
}

/// Owns the cart and keeps it in sync with a [`KeyValueStore`].
pub struct CartStore {
    state: watch::Sender<Cart>,
    storage: Arc<dyn KeyValueStore>,
    key: String,
    persist_noop_writes: bool,
    writer: Mutex<()>,
    mutated: AtomicBool,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.state.borrow().len())
            .field("persist_noop_writes", &self.persist_noop_writes)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store with an empty cart. Call [`hydrate`](Self::hydrate) to
    /// load the stored snapshot.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Self {
        let (state, _) = watch::channel(Cart::new());
        Self {
            state,
            storage,
            key: config.storage_key(),
            persist_noop_writes: config.persist_noop_writes,
            writer: Mutex::new(()),
            mutated: AtomicBool::new(false),
        }
    }

    /// The storage key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Snapshot of the current cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Snapshot of the current line items, in cart order.
    #[must_use]
    pub fn products(&self) -> Vec<LineItem> {
        self.state.borrow().items().to_vec()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver starts with the current cart marked as seen and is
    /// notified after every mutation that changed the cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product to the cart.
    ///
    /// Any quantity carried by the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart could not be written to storage. The
    /// in-memory cart keeps the change either way.
    pub async fn add_to_cart(&self, product: impl Into<Product> + Send) -> Result<()> {
        let product = product.into();
        debug!(product_id = %product.id, "Adding product to cart");
        self.apply(|cart| cart.add(product)).await
    }

    /// Add one unit to the line item with this ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart could not be written to storage.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.apply(|cart| cart.increment(id)).await
    }

    /// Remove one unit from the line item with this ID, dropping the item
    /// when its quantity reaches zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart could not be written to storage.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.apply(|cart| cart.decrement(id)).await
    }

    /// Empty the cart and write the empty cart to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart could not be written to storage.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn clear(&self) -> Result<()> {
        self.state.send_if_modified(|cart| {
            let changed = cart.clear();
            if changed {
                self.mutated.store(true, Ordering::SeqCst);
            }
            changed
        });
        self.persist().await
    }

    /// Write the current cart to storage, whether or not it changed.
    ///
    /// # Errors
    ///
    /// Returns `CartError` if the cart could not be written to storage.
    pub async fn flush(&self) -> Result<()> {
        self.persist().await
    }

    /// Load the stored snapshot into memory.
    ///
    /// A snapshot that cannot be parsed, or that holds a zero quantity or a
    /// duplicate ID, is logged and ignored. If the cart was already modified
    /// or written through this store (including `clear`, `flush`, and no-op
    /// writes), the snapshot is ignored as well: storage already holds the
    /// local state, which is newer.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the storage read itself fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn hydrate(&self) -> Result<Hydration> {
        let Some(raw) = self.storage.get(&self.key).await? else {
            debug!("No stored cart");
            return Ok(Hydration::Empty);
        };

        let snapshot: Cart = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                return Ok(Hydration::Discarded);
            }
        };

        let items = snapshot.len();
        let mut outcome = Hydration::Superseded;
        self.state.send_if_modified(|cart| {
            if self.mutated.load(Ordering::SeqCst) {
                return false;
            }
            outcome = Hydration::Restored { items };
            let changed = *cart != snapshot;
            *cart = snapshot;
            changed
        });

        match outcome {
            Hydration::Restored { items } => info!(items, "Restored cart from storage"),
            _ => info!("Cart changed before hydration finished, keeping local state"),
        }
        Ok(outcome)
    }

    /// Mutate the live cart and write it through when it changed.
    async fn apply<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Cart) -> bool + Send,
    {
        let changed = self.state.send_if_modified(|cart| {
            let changed = mutate(cart);
            if changed {
                self.mutated.store(true, Ordering::SeqCst);
            }
            changed
        });

        if changed || self.persist_noop_writes {
            self.persist().await
        } else {
            debug!("Cart unchanged, skipping write");
            Ok(())
        }
    }

    /// Write the live cart to storage.
    ///
    /// Marks the store as mutated before taking the snapshot: once a write
    /// is issued, a hydration still in flight must not replace memory with
    /// an older snapshot than the one storage is about to hold.
    async fn persist(&self) -> Result<()> {
        let _writer = self.writer.lock().await;
        self.mutated.store(true, Ordering::SeqCst);
        let payload = {
            let cart = self.state.borrow();
            serde_json::to_string(&*cart)?
        };
        self.storage.set(&self.key, payload).await?;
        debug!(key = %self.key, "Cart written to storage");
        Ok(())
    }
}
