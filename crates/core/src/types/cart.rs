//! The cart aggregate and its mutation rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::{LineItem, Product};

/// Errors that can occur when building a [`Cart`] from stored line items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// A line item carries a quantity of zero.
    #[error("line item {0} has a quantity of zero")]
    ZeroQuantity(ProductId),
    /// Two line items share the same product ID.
    #[error("product {0} appears more than once")]
    DuplicateId(ProductId),
}

/// An ordered list of line items, keyed by product ID.
///
/// ## Invariants
///
/// - Every line item has a quantity of at least 1
/// - No two line items share an ID
/// - Insertion order is preserved; removing an item does not reorder the rest
///
/// Serialized as a bare JSON array of [`LineItem`]. Deserialization rejects
/// snapshots that break the invariants.
///
/// ## Examples
///
/// ```
/// use go_marketplace_core::{Cart, Product, ProductId};
/// use rust_decimal::Decimal;
///
/// let mut cart = Cart::new();
/// let tea = Product::new("p1", "Tea", "", Decimal::new(450, 2));
///
/// cart.add(tea.clone());
/// cart.add(tea);
/// assert_eq!(cart.get(&ProductId::from("p1")).map(|i| i.quantity), Some(2));
///
/// cart.decrement(&ProductId::from("p1"));
/// cart.decrement(&ProductId::from("p1"));
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the quantity if the product is already in the cart,
    /// otherwise appends a new line item with a quantity of one. Any quantity
    /// carried by the input is ignored.
    ///
    /// Always returns `true`.
    pub fn add(&mut self, product: impl Into<Product>) -> bool {
        let product = product.into();
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem::new(product));
        }
        true
    }

    /// Add one unit to an existing line item.
    ///
    /// Returns `false` (and leaves the cart untouched) if the ID is unknown.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Remove one unit from an existing line item.
    ///
    /// A line item at quantity 1 is removed in place. Returns `false` (and
    /// leaves the cart untouched) if the ID is unknown.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let remove = match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                false
            }
            Some(_) => true,
            None => return false,
        };

        if remove {
            self.items.remove(index);
        }
        true
    }

    /// Remove every line item. Returns `false` if the cart was already empty.
    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the cart holds no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Consumes the cart and returns its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id.clone()));
            }
            if !seen.insert(&item.id) {
                return Err(CartError::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
