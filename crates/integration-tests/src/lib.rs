//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end cart flows through the provider scope
//! - `cart_persistence` - Snapshots surviving a restart on the file store
//!
//! Shared fixtures live here so each test file stays focused on behavior.

use go_marketplace_core::{Cart, Product};
use rust_decimal::Decimal;

/// A catalog product with a predictable title and price.
#[must_use]
pub fn product(id: &str) -> Product {
    Product::new(
        id,
        format!("Product {id}"),
        format!("https://cdn.example.com/{id}.png"),
        Decimal::new(1990, 2),
    )
}

/// `(id, quantity)` pairs in cart order.
#[must_use]
pub fn quantities(cart: &Cart) -> Vec<(String, u32)> {
    cart.iter()
        .map(|item| (item.id.to_string(), item.quantity))
        .collect()
}

/// Build the expected `quantities` output from literals.
#[must_use]
pub fn expect(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(id, qty)| ((*id).to_string(), *qty))
        .collect()
}
