//! Deterministic collaborator fakes for cart tests.
//!
//! Enabled for this crate's own unit tests and, via the `testkit` feature,
//! for downstream crates (integration tests, UI harnesses). The fakes are
//! fully in-memory and support failure injection so the divergence and
//! notification paths can be exercised without a network or a disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;

use shoebox_core::{Price, Product, ProductId, StockLevel};

use crate::api::{ApiError, CommerceApi};
use crate::notify::Notifier;
use crate::storage::{MemoryStorage, SnapshotStorage, StorageError};

/// Programmable in-memory commerce API.
///
/// Stock and catalog entries are seeded through the builder methods;
/// `set_fail_stock` / `set_fail_products` make the next lookups fail the way
/// a network outage would.
#[derive(Debug, Default)]
pub struct FakeCommerceApi {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, i64>>,
    fail_stock: AtomicBool,
    fail_products: AtomicBool,
}

impl FakeCommerceApi {
    /// Create a fake with no products and no stock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog product together with its stock level.
    ///
    /// # Panics
    ///
    /// Panics if `price` is not a valid decimal literal.
    #[must_use]
    pub fn with_product(self, id: i64, title: &str, price: &str, stock: i64) -> Self {
        let id = ProductId::new(id);
        let product = Product {
            id,
            image: format!("https://cdn.shoebox.store/products/{id}.jpg"),
            price: Price::new(price.parse::<Decimal>().expect("valid decimal literal")),
            title: title.to_string(),
        };
        lock(&self.products).insert(id, product);
        lock(&self.stock).insert(id, stock);
        self
    }

    /// Override the stock level for a product at runtime.
    pub fn set_stock(&self, id: i64, amount: i64) {
        lock(&self.stock).insert(ProductId::new(id), amount);
    }

    /// Make subsequent stock lookups fail as if the service were down.
    pub fn set_fail_stock(&self, fail: bool) {
        self.fail_stock.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent catalog lookups fail as if the service were down.
    pub fn set_fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommerceApi for FakeCommerceApi {
    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, ApiError> {
        if self.fail_stock.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 503,
                message: "inventory service unavailable".to_string(),
            });
        }
        lock(&self.stock)
            .get(&id)
            .map(|&amount| StockLevel {
                product_id: id,
                amount,
            })
            .ok_or_else(|| ApiError::NotFound(format!("stock for product {id}")))
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(ApiError::Api {
                status: 503,
                message: "catalog service unavailable".to_string(),
            });
        }
        lock(&self.products)
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("product {id}")))
    }
}

/// Notifier that records every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create a notifier with an empty message log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages delivered so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}

/// Storage wrapper that injects write failures.
///
/// Reads always succeed against the wrapped in-memory store; writes fail
/// while the flag is set, which is how the in-memory/persisted divergence
/// window is exercised in tests.
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FailingStorage {
    /// Create a storage whose writes succeed until told otherwise.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SnapshotStorage for FailingStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other(
                "injected write failure",
            )));
        }
        self.inner.set(key, value).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_api_serves_seeded_product() {
        let api = FakeCommerceApi::new().with_product(7, "Shoe", "139.90", 3);

        let stock = api.get_stock(ProductId::new(7)).await.unwrap();
        assert_eq!(stock.amount, 3);

        let product = api.get_product(ProductId::new(7)).await.unwrap();
        assert_eq!(product.title, "Shoe");
    }

    #[tokio::test]
    async fn test_fake_api_unknown_product_is_not_found() {
        let api = FakeCommerceApi::new();
        assert!(matches!(
            api.get_stock(ProductId::new(1)).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failing_storage_blocks_writes_only() {
        let storage = FailingStorage::new();
        storage.set("k", "v").await.unwrap();

        storage.set_fail_writes(true);
        assert!(storage.set("k", "w").await.is_err());
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
