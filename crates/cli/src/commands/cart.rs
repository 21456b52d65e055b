//! Cart commands.
//!
//! Every command opens the file-backed store, hydrates the cart, applies
//! its change, and lets the store write it back.
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_PATH` - Storage file (default: cart-storage.json)
//! - `CART_NAMESPACE` - Storage key namespace (default: @GoMarketplace)

use std::sync::Arc;

use go_marketplace_cart::{CartConfig, CartError, CartProvider, ConfigError, FileStore};
use go_marketplace_core::{Product, ProductId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Input rejected before touching the cart.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Open the stored cart described by the environment.
pub async fn open() -> Result<CartProvider, CommandError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(path = %config.storage_path.display(), key = %config.storage_key(), "Opening cart");

    let storage = Arc::new(FileStore::new(config.storage_path.clone()));
    Ok(CartProvider::mount(storage, &config).await?)
}

/// Log every line item of the cart.
pub fn show(provider: &CartProvider) {
    let cart = provider.handle().cart();
    if cart.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for item in &cart {
        tracing::info!(
            "{} x{} - {} ({}) {}",
            item.id,
            item.quantity,
            item.title,
            item.price,
            item.image_url
        );
    }
    tracing::info!(
        "{} products, {} units",
        cart.len(),
        cart.total_quantity()
    );
}

/// Add one unit of a product.
pub async fn add(
    provider: &CartProvider,
    id: &str,
    title: &str,
    image_url: &str,
    price: Decimal,
) -> Result<(), CommandError> {
    if id.trim().is_empty() {
        return Err(CommandError::InvalidInput("product id cannot be empty".into()));
    }

    let cart = provider.handle();
    cart.add_to_cart(Product::new(id, title, image_url, price))
        .await?;

    let quantity = cart
        .cart()
        .get(&ProductId::from(id))
        .map_or(0, |item| item.quantity);
    tracing::info!("Added {id} (quantity now {quantity})");
    Ok(())
}

/// Add one unit to a line item.
pub async fn increment(provider: &CartProvider, id: &str) -> Result<(), CommandError> {
    let id = ProductId::from(id);
    let cart = provider.handle();
    if !in_cart(provider, &id) {
        tracing::warn!("{id} is not in the cart");
    }
    cart.increment(&id).await?;
    Ok(())
}

/// Remove one unit from a line item.
pub async fn decrement(provider: &CartProvider, id: &str) -> Result<(), CommandError> {
    let id = ProductId::from(id);
    let cart = provider.handle();
    let present = in_cart(provider, &id);
    if !present {
        tracing::warn!("{id} is not in the cart");
    }
    cart.decrement(&id).await?;
    if present && cart.cart().get(&id).is_none() {
        tracing::info!("{id} removed from the cart");
    }
    Ok(())
}

/// Remove every line item.
pub async fn clear(provider: &CartProvider) -> Result<(), CommandError> {
    provider.handle().clear().await?;
    tracing::info!("Cart cleared");
    Ok(())
}

fn in_cart(provider: &CartProvider, id: &ProductId) -> bool {
    provider.handle().cart().get(id).is_some()
}
