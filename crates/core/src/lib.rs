//! Shoebox Core - Shared types library.
//!
//! This crate provides the domain types used across all Shoebox components:
//! - `cart` - Client-side cart state management
//! - `integration-tests` - End-to-end cart flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, catalog records, and cart line-items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
