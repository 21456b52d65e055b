//! Provider scope for sharing one cart across the app.
//!
//! A [`CartProvider`] owns the cart store. Code that holds the provider can
//! take a [`CartHandle`] directly; code further down the call tree runs
//! inside [`CartProvider::scope`] and asks for the handle with [`use_cart`],
//! which fails with [`CartError::MissingProvider`] outside of any scope.
//!
//! The scope is a tokio task-local, so it follows a future across `.await`
//! points but not into `tokio::spawn`ed tasks. Re-enter it in a spawned task
//! with [`CartHandle::scope`].

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::storage::KeyValueStore;
use crate::store::{CartStore, Hydration};

tokio::task_local! {
    static CURRENT_CART: CartHandle;
}

/// Shared access to a cart store.
///
/// Cheaply cloneable via `Arc`; derefs to [`CartStore`] for the cart
/// operations.
#[derive(Debug, Clone)]
pub struct CartHandle {
    store: Arc<CartStore>,
}

impl CartHandle {
    /// Run `future` with this handle available through [`use_cart`].
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        CURRENT_CART.scope(self.clone(), future).await
    }

    /// Returns `true` if both handles point at the same store.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Deref for CartHandle {
    type Target = CartStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Owns the cart for a part of the application.
#[derive(Debug, Clone)]
pub struct CartProvider {
    handle: CartHandle,
}

impl CartProvider {
    /// Create a provider with an empty, not yet hydrated cart.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Self {
        Self {
            handle: CartHandle {
                store: Arc::new(CartStore::new(storage, config)),
            },
        }
    }

    /// Create a provider and load the stored cart before returning.
    ///
    /// Callers never observe the empty pre-hydration cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the stored cart could not be read.
    pub async fn mount(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Result<Self> {
        let provider = Self::new(storage, config);
        provider.handle.hydrate().await?;
        Ok(provider)
    }

    /// Create a provider and load the stored cart in a background task.
    ///
    /// The cart starts empty and is replaced once the snapshot arrives,
    /// unless it was modified in the meantime. Must be called from within a
    /// tokio runtime.
    #[must_use]
    pub fn mount_in_background(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Self {
        let provider = Self::new(storage, config);
        let handle = provider.handle();
        info!(key = %handle.key(), "Spawning background cart hydration");
        tokio::spawn(async move {
            match handle.hydrate().await {
                Ok(Hydration::Restored { items }) => info!(items, "Background hydration complete"),
                Ok(outcome) => info!(?outcome, "Background hydration finished"),
                Err(e) => error!(error = %e, "Failed to load stored cart"),
            }
        });
        provider
    }

    /// A handle to this provider's cart.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Run `future` inside this provider's scope.
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        self.handle.scope(future).await
    }
}

/// The cart of the enclosing provider scope.
///
/// # Errors
///
/// Returns `CartError::MissingProvider` when called outside of
/// [`CartProvider::scope`] or [`CartHandle::scope`].
pub fn use_cart() -> Result<CartHandle> {
    CURRENT_CART
        .try_with(CartHandle::clone)
        .map_err(|_| CartError::MissingProvider)
}
