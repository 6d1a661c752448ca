//! Commerce API collaborator: stock and catalog lookups.
//!
//! The cart never owns inventory data. Every operation fetches a fresh
//! [`StockLevel`] from the inventory service (no caching - stock is mutable
//! state owned by the backend), and first-time adds fetch the full catalog
//! [`Product`] to build the new line-item.

mod rest;

pub use rest::RestCommerceClient;

use async_trait::async_trait;
use thiserror::Error;

use shoebox_core::{Product, ProductId, StockLevel};

/// Errors that can occur when calling the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Stock and catalog lookups consumed by the cart.
///
/// Implemented by [`RestCommerceClient`] in production and by
/// `testkit::FakeCommerceApi` in tests.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Fetch the current stock level for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the request fails.
    async fn get_stock(&self, id: ProductId) -> Result<StockLevel, ApiError>;

    /// Fetch the catalog record for a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the request fails.
    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product 9".to_string());
        assert_eq!(err.to_string(), "not found: product 9");

        let err = ApiError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - service unavailable");
    }
}
