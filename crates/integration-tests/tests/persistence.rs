//! Snapshot persistence: round-trips, reloads, and the divergence window.

use std::sync::Arc;

use shoebox_cart::{CartError, CartStore};
use shoebox_cart::storage::{DEFAULT_CART_KEY, JsonFileStorage, SnapshotStorage};
use shoebox_cart::testkit::{FailingStorage, FakeCommerceApi, RecordingNotifier};
use shoebox_core::ProductId;

use shoebox_integration_tests::{init_tracing, parse_snapshot};

fn seeded_api() -> Arc<FakeCommerceApi> {
    Arc::new(
        FakeCommerceApi::new()
            .with_product(1, "Court Classic", "139.90", 5)
            .with_product(2, "Trail Runner", "179.90", 4),
    )
}

#[tokio::test]
async fn test_file_storage_round_trip_restores_identical_cart() {
    init_tracing();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cart.json");
    let api = seeded_api();
    let notifier = Arc::new(RecordingNotifier::new());

    let store = CartStore::load(
        api.clone(),
        Arc::new(JsonFileStorage::new(&path)),
        notifier.clone(),
        DEFAULT_CART_KEY,
    )
    .await
    .expect("load");
    store.add_item(ProductId::new(1)).await.expect("add 1");
    store.add_item(ProductId::new(2)).await.expect("add 2");
    store.update_quantity(ProductId::new(1), 4).await.expect("update");
    let before = store.items();
    drop(store);

    // A fresh store against the same file sees the identical cart.
    let reloaded = CartStore::load(
        api,
        Arc::new(JsonFileStorage::new(&path)),
        notifier,
        DEFAULT_CART_KEY,
    )
    .await
    .expect("reload");
    assert_eq!(reloaded.items(), before);
}

#[tokio::test]
async fn test_corrupt_snapshot_surfaces_as_storage_error() {
    init_tracing();
    let storage = Arc::new(shoebox_cart::storage::MemoryStorage::new());
    storage
        .set(DEFAULT_CART_KEY, "not json at all")
        .await
        .expect("seed");

    let result = CartStore::load(
        seeded_api(),
        storage,
        Arc::new(RecordingNotifier::new()),
        DEFAULT_CART_KEY,
    )
    .await;

    assert!(matches!(result, Err(CartError::Storage(_))));
}

#[tokio::test]
async fn test_failed_write_on_increment_leaves_memory_ahead_of_storage() {
    init_tracing();
    let api = seeded_api();
    let storage = Arc::new(FailingStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::load(api, storage.clone(), notifier, DEFAULT_CART_KEY)
        .await
        .expect("load");

    store.add_item(ProductId::new(1)).await.expect("add");

    // Existing-item adds mutate memory before persisting, so a failed write
    // opens a divergence window: memory says 2, storage still says 1.
    storage.set_fail_writes(true);
    let err = store.add_item(ProductId::new(1)).await.expect_err("write blocked");
    assert!(matches!(err, CartError::Storage(_)));
    assert_eq!(store.items()[0].amount, 2);

    let raw = storage
        .get(DEFAULT_CART_KEY)
        .await
        .expect("read")
        .expect("snapshot present");
    assert_eq!(parse_snapshot(&raw).items[0].amount, 1);

    // The next successful mutation closes the window.
    storage.set_fail_writes(false);
    store.add_item(ProductId::new(1)).await.expect("add");
    assert_eq!(store.items()[0].amount, 3);

    let raw = storage
        .get(DEFAULT_CART_KEY)
        .await
        .expect("read")
        .expect("snapshot present");
    assert_eq!(parse_snapshot(&raw).items[0].amount, 3);
}

#[tokio::test]
async fn test_failed_write_on_first_add_commits_nothing() {
    init_tracing();
    let api = seeded_api();
    let storage = Arc::new(FailingStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::load(api, storage.clone(), notifier, DEFAULT_CART_KEY)
        .await
        .expect("load");

    // New items persist before committing to memory, so a failed write
    // leaves both sides empty.
    storage.set_fail_writes(true);
    let err = store.add_item(ProductId::new(1)).await.expect_err("write blocked");
    assert!(matches!(err, CartError::Storage(_)));
    assert!(store.is_empty());
    assert!(storage.get(DEFAULT_CART_KEY).await.expect("read").is_none());
}
