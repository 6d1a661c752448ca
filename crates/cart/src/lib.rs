//! Shoebox Cart - client-side cart state management.
//!
//! This crate holds the cart of a storefront client: an ordered list of
//! line-items mutated through three operations (add, remove, update quantity),
//! each validated against the remote inventory service and persisted to a
//! local key-value store after every successful mutation.
//!
//! # Architecture
//!
//! The [`store::CartStore`] owns the in-memory cart and is wired to three
//! injected collaborators:
//!
//! - [`api::CommerceApi`] - stock and catalog lookups (`GET /stock/{id}`,
//!   `GET /products/{id}`)
//! - [`storage::SnapshotStorage`] - get/set on a single well-known key holding
//!   the JSON-serialized cart snapshot
//! - [`notify::Notifier`] - fire-and-forget user-facing messages
//!
//! All three are traits so the store is testable without a network or a disk;
//! the `testkit` feature exposes deterministic fakes for downstream crates.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use shoebox_cart::api::RestCommerceClient;
//! use shoebox_cart::config::CartConfig;
//! use shoebox_cart::notify::TracingNotifier;
//! use shoebox_cart::storage::JsonFileStorage;
//! use shoebox_cart::store::CartStore;
//!
//! let config = CartConfig::from_env()?;
//! let api = Arc::new(RestCommerceClient::new(&config)?);
//! let storage = Arc::new(JsonFileStorage::new(&config.storage_path));
//! let store = CartStore::load(api, storage, Arc::new(TracingNotifier), config.cart_key).await?;
//!
//! store.add_item(product_id).await?;
//! for item in store.items() {
//!     println!("{} x{}", item.title, item.amount);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

pub use error::{CartError, Result};
pub use store::CartStore;
