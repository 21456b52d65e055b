//! GoMarketplace cart library.
//!
//! Holds the shopper's cart in memory, mirrors every change to a persistent
//! key-value store, and hands the cart to the rest of the app through a
//! provider scope.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the cart. Mutations run atomically against the
//!   live state and are written through to storage before they complete.
//! - [`provider::CartProvider`] builds and hydrates a store; code running
//!   inside [`provider::CartProvider::scope`] reaches it with
//!   [`provider::use_cart`].
//! - [`storage::KeyValueStore`] is the storage seam, with in-memory and
//!   file-backed implementations.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::{CartConfig, CartProvider, MemoryStore, use_cart};
//! use go_marketplace_core::Product;
//! use rust_decimal::Decimal;
//!
//! # async fn demo() -> go_marketplace_cart::Result<()> {
//! let provider = CartProvider::mount(Arc::new(MemoryStore::new()), &CartConfig::default()).await?;
//!
//! provider
//!     .scope(async {
//!         let cart = use_cart()?;
//!         cart.add_to_cart(Product::new("p1", "Tea", "", Decimal::new(450, 2))).await
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use provider::{CartHandle, CartProvider, use_cart};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, Hydration};
