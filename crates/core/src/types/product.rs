//! Catalog and inventory records fetched from the commerce API.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A catalog product as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identity.
    pub id: ProductId,
    /// URL of the product image.
    pub image: String,
    /// Unit price.
    pub price: Price,
    /// Display title.
    pub title: String,
}

/// Available stock for a product, as returned by `GET /stock/{id}`.
///
/// This is a read-only snapshot owned by the inventory service; it is fetched
/// per cart operation and never cached locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevel {
    /// Product this stock level refers to.
    pub product_id: ProductId,
    /// Units currently available.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_product_deserializes_from_api_shape() {
        let json = r#"{"id":7,"image":"https://cdn.example.com/shoe.jpg","price":139.9,"title":"Shoe"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.title, "Shoe");
        assert_eq!(product.price.amount(), Decimal::new(1399, 1));
    }

    #[test]
    fn test_stock_level_uses_camel_case() {
        let json = r#"{"productId":3,"amount":5}"#;
        let stock: StockLevel = serde_json::from_str(json).unwrap();
        assert_eq!(stock.product_id, ProductId::new(3));
        assert_eq!(stock.amount, 5);

        let back = serde_json::to_string(&stock).unwrap();
        assert_eq!(back, json);
    }
}
