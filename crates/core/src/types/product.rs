//! Catalog products and cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product as handed to the cart by the product listing.
///
/// Everything except `id` is display data the cart passes through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price, stored as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Product {
    /// Create a new product.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// One product entry in the cart together with its quantity.
///
/// Field names match the persisted snapshot format:
/// `id`, `title`, `image_url`, `price`, `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price, stored as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Number of units, at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item for a product with a quantity of one.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}

impl From<Product> for LineItem {
    fn from(product: Product) -> Self {
        Self::new(product)
    }
}

/// Drops the quantity, so a line item can be re-added to a cart.
impl From<LineItem> for Product {
    fn from(item: LineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: item.image_url,
            price: item.price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn avocado() -> Product {
        Product::new(
            "p1",
            "Avocado",
            "https://cdn.example.com/avocado.png",
            Decimal::new(1999, 2),
        )
    }

    #[test]
    fn test_line_item_starts_at_one() {
        let item = LineItem::new(avocado());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.id.as_str(), "p1");
    }

    #[test]
    fn test_line_item_wire_format() {
        let item = LineItem::new(avocado());
        let json: serde_json::Value = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], "p1");
        assert_eq!(json["title"], "Avocado");
        assert_eq!(json["image_url"], "https://cdn.example.com/avocado.png");
        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_line_item_accepts_integer_price() {
        let json = r#"{"id":"p9","title":"Tea","image_url":"","price":5,"quantity":3}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.price, Decimal::new(5, 0));
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_product_from_line_item_drops_quantity() {
        let mut item = LineItem::new(avocado());
        item.quantity = 7;

        let product = Product::from(item);
        assert_eq!(product, avocado());
    }
}
