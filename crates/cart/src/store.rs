//! The cart store: add, remove, and update-quantity over injected collaborators.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::instrument;

use shoebox_core::{CartSnapshot, LineItem, Price, ProductId};

use crate::api::CommerceApi;
use crate::error::{CartError, Result};
use crate::notify::{Notifier, messages};
use crate::storage::{SnapshotStorage, StorageError};

/// Client-side cart state.
///
/// Holds the ordered line-item list, validates every mutation against the
/// inventory service, and overwrites the persisted snapshot after each
/// successful mutation. Consumers read the cart through [`CartStore::items`]
/// and mutate it only through the three operations.
///
/// Operations return a typed [`CartError`] for programmatic callers and, on
/// failure, push one fixed user-facing string to the notification sink - the
/// UI renders the sink and may ignore the return value.
///
/// # Concurrency
///
/// The store is built for a single cooperative UI event loop. The item list
/// sits behind an `RwLock` that is never held across an await, so two
/// concurrent operations on the same product can read stale pre-update state
/// before either write commits. Callers wanting stronger guarantees must
/// serialize their calls.
pub struct CartStore {
    api: Arc<dyn CommerceApi>,
    storage: Arc<dyn SnapshotStorage>,
    notifier: Arc<dyn Notifier>,
    cart_key: String,
    items: RwLock<Vec<LineItem>>,
}

impl CartStore {
    /// Create a store by loading the persisted snapshot under `cart_key`.
    ///
    /// A missing snapshot yields an empty cart; a snapshot that exists but
    /// does not parse is surfaced as a storage error.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or parsed.
    pub async fn load(
        api: Arc<dyn CommerceApi>,
        storage: Arc<dyn SnapshotStorage>,
        notifier: Arc<dyn Notifier>,
        cart_key: impl Into<String>,
    ) -> Result<Self> {
        let cart_key = cart_key.into();
        let items = match storage.get(&cart_key).await? {
            Some(raw) => {
                serde_json::from_str::<CartSnapshot>(&raw)
                    .map_err(StorageError::from)?
                    .items
            }
            None => Vec::new(),
        };
        tracing::debug!(items = items.len(), "cart loaded");

        Ok(Self {
            api,
            storage,
            notifier,
            cart_key,
            items: RwLock::new(items),
        })
    }

    /// Read-only view of the current cart, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of line-items in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cart has no line-items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all line totals, for the cart summary.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|i| i.line_total().amount())
            .sum::<rust_decimal::Decimal>()
            .into()
    }

    /// Add one unit of a product to the cart.
    ///
    /// A product already in the cart has its quantity incremented by 1 if
    /// stock allows; a new product is fetched from the catalog and appended
    /// with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the increment would exceed
    /// available stock, or the underlying collaborator error. Failures also
    /// emit the matching user-facing notification.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_item(&self, id: ProductId) -> Result<()> {
        let result = self.try_add(id).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "add to cart failed");
            self.notifier.notify(match e {
                CartError::OutOfStock => messages::OUT_OF_STOCK,
                _ => messages::ADD_FAILED,
            });
        }
        result
    }

    /// Remove a product from the cart entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotFound`] if the product is not in the cart, or
    /// a storage error if the snapshot write fails. Failures also emit the
    /// remove-failed notification.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_item(&self, id: ProductId) -> Result<()> {
        let result = self.try_remove(id).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "remove from cart failed");
            self.notifier.notify(messages::REMOVE_FAILED);
        }
        result
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A non-positive `amount` is a silent no-op, as is a product id that is
    /// not in the cart (the UI quantity stepper never produces either under
    /// normal operation).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] when the requested quantity exceeds
    /// available stock, or the underlying collaborator error. Failures also
    /// emit the matching user-facing notification.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn update_quantity(&self, id: ProductId, amount: i32) -> Result<()> {
        if amount <= 0 {
            return Ok(());
        }
        // amount > 0 here, so the conversion cannot fail.
        let Ok(requested) = u32::try_from(amount) else {
            return Ok(());
        };

        let result = self.try_update(id, requested).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "quantity update failed");
            self.notifier.notify(match e {
                CartError::OutOfStock => messages::OUT_OF_STOCK,
                _ => messages::UPDATE_FAILED,
            });
        }
        result
    }

    async fn try_add(&self, id: ProductId) -> Result<()> {
        let current = self.amount_of(id);
        let stock = self.api.get_stock(id).await?;

        match current {
            Some(amount) => {
                if i64::from(amount) >= stock.amount {
                    return Err(CartError::OutOfStock);
                }
                // The in-memory increment commits before the snapshot write;
                // a failed write leaves memory and storage divergent until
                // the next successful persist.
                let snapshot = self.with_items(|items| {
                    if let Some(item) = items.iter_mut().find(|i| i.id == id) {
                        item.amount += 1;
                    }
                    items.clone()
                });
                self.persist(snapshot).await?;
            }
            None => {
                // Any non-negative stock level admits a first add; a lookup
                // failure has already surfaced through `?` above.
                if stock.amount < 0 {
                    return Err(CartError::OutOfStock);
                }
                let product = self.api.get_product(id).await?;

                // New items persist first and commit to memory only after
                // the write succeeds.
                let mut next = self.items();
                next.push(LineItem::from_product(product));
                self.persist(next.clone()).await?;
                self.with_items(|items| *items = next);
            }
        }

        Ok(())
    }

    async fn try_remove(&self, id: ProductId) -> Result<()> {
        let snapshot = self.with_items(|items| {
            items
                .iter()
                .position(|i| i.id == id)
                .map(|pos| {
                    items.remove(pos);
                    items.clone()
                })
                .ok_or(CartError::NotFound(id))
        })?;
        self.persist(snapshot).await?;
        Ok(())
    }

    async fn try_update(&self, id: ProductId, requested: u32) -> Result<()> {
        let present = self.amount_of(id).is_some();
        let stock = self.api.get_stock(id).await?;

        // An absent product id is a silent no-op, unlike remove_item.
        if !present {
            return Ok(());
        }
        if stock.amount < i64::from(requested) {
            return Err(CartError::OutOfStock);
        }

        let snapshot = self.with_items(|items| {
            if let Some(item) = items.iter_mut().find(|i| i.id == id) {
                item.amount = requested;
            }
            items.clone()
        });
        self.persist(snapshot).await?;
        Ok(())
    }

    /// Current quantity of a product in the cart, if present.
    fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.amount)
    }

    /// Run a closure under the write lock. The lock is never held across an
    /// await point.
    fn with_items<R>(&self, f: impl FnOnce(&mut Vec<LineItem>) -> R) -> R {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut items)
    }

    /// Overwrite the persisted snapshot with the given item list.
    async fn persist(&self, items: Vec<LineItem>) -> std::result::Result<(), StorageError> {
        let snapshot = CartSnapshot::new(items);
        let json = serde_json::to_string(&snapshot)?;
        self.storage.set(&self.cart_key, &json).await
    }
}
