//! JSON file-backed snapshot storage.
//!
//! The local-storage analogue for a native client: one JSON document on disk
//! holding a string-to-string map of keys to serialized values. Writes go
//! through a temp file and rename so a crash mid-write never leaves a
//! half-written document behind.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::storage::{SnapshotStorage, StorageError};

/// Durable key-value storage backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a store backed by the file at `path`.
    ///
    /// The file (and its parent directory) is created lazily on first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full key-value document, treating a missing file as empty.
    async fn read_entries(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_entries().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));
        assert!(storage.get("@shoebox:cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.set("@shoebox:cart", r#"{"items":[]}"#).await.unwrap();
        assert_eq!(
            storage.get("@shoebox:cart").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("cart.json"));

        storage.set("a", "1").await.unwrap();
        storage.set("b", "2").await.unwrap();
        assert_eq!(storage.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(storage.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/deep/cart.json"));

        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_reopening_sees_previous_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");

        let storage = JsonFileStorage::new(&path);
        storage.set("k", "persisted").await.unwrap();
        drop(storage);

        let reopened = JsonFileStorage::new(&path);
        assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("persisted"));
    }
}
