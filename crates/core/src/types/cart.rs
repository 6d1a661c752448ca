//! Cart line-items and the persisted snapshot envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::Product;

/// A single product entry in the cart with its quantity.
///
/// Line-items are unique by `id` within a cart, and a quantity of at least 1
/// is maintained by construction: items reaching zero are removed rather than
/// kept at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identity, unique within the cart.
    pub id: ProductId,
    /// URL of the product image.
    pub image: String,
    /// Unit price at the time the item was added.
    pub price: Price,
    /// Display title.
    pub title: String,
    /// Quantity in the cart, always >= 1.
    pub amount: u32,
}

impl LineItem {
    /// Create a line-item for a freshly added product with quantity 1.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            image: product.image,
            price: product.price,
            title: product.title,
            amount: 1,
        }
    }

    /// Total price for this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * rust_decimal::Decimal::from(self.amount))
    }
}

/// Full serialized representation of the cart, persisted after each mutation.
///
/// The whole snapshot is overwritten on every successful cart operation;
/// there is no incremental journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// Line-items in insertion (display) order.
    pub items: Vec<LineItem>,
    /// When this snapshot was written.
    pub saved_at: DateTime<Utc>,
}

impl CartSnapshot {
    /// Create a snapshot of the given items, stamped with the current time.
    #[must_use]
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            items,
            saved_at: Utc::now(),
        }
    }
}
