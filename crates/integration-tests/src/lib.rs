//! Integration tests for Shoebox.
//!
//! End-to-end cart flows wired against the `shoebox-cart` testkit fakes and
//! the real file-backed storage. No network or external services required;
//! everything runs in-process.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoebox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flows` - Multi-step shopping flows and notification behavior
//! - `persistence` - Snapshot round-trips, reloads, and divergence windows

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Once;

use shoebox_core::CartSnapshot;

static TRACING: Once = Once::new();

/// Install a test tracing subscriber once per process.
///
/// Honors `RUST_LOG`; output is captured per test by the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Parse a raw persisted value into a cart snapshot.
///
/// # Panics
///
/// Panics if the value is not a valid snapshot; tests treat that as failure.
#[must_use]
pub fn parse_snapshot(raw: &str) -> CartSnapshot {
    serde_json::from_str(raw).expect("persisted value should be a valid cart snapshot")
}
