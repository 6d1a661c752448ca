//! Key-value persistence collaborator for cart snapshots.
//!
//! Mirrors the get/set surface of browser local storage: the cart is
//! serialized as a whole and written under one well-known key after every
//! successful mutation. Backends only move opaque strings; serialization
//! lives with the store.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Default key the cart snapshot is stored under.
pub const DEFAULT_CART_KEY: &str = "@shoebox:cart";

/// Errors that can occur reading or writing persisted snapshots.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Get/set key-value persistence for the serialized cart snapshot.
///
/// Implemented by [`JsonFileStorage`] for durable local persistence and
/// [`MemoryStorage`] for tests and ephemeral sessions.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. In-memory cart state and
    /// persisted state diverge until the next successful write (the two are
    /// not transactionally linked).
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
