//! Unified error handling for cart operations.
//!
//! Each collaborator module defines its own error enum (`ApiError`,
//! `StorageError`); cart operations fold them into [`CartError`] via `#[from]`.
//! At the operation boundary every failure additionally collapses to one fixed
//! user-facing notification string per operation type (see [`crate::notify`]).

use thiserror::Error;

use shoebox_core::ProductId;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors a cart operation can fail with.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds available stock.
    #[error("requested quantity is out of stock")]
    OutOfStock,

    /// Operation target absent from the cart.
    #[error("product not in cart: {0}")]
    NotFound(ProductId),

    /// Stock or catalog lookup failed.
    #[error("commerce API error: {0}")]
    Api(#[from] ApiError),

    /// Snapshot persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "product not in cart: 9");

        let err = CartError::OutOfStock;
        assert_eq!(err.to_string(), "requested quantity is out of stock");
    }

    #[test]
    fn test_cart_error_from_api_error() {
        let err: CartError = ApiError::NotFound("product 9".to_string()).into();
        assert!(matches!(err, CartError::Api(ApiError::NotFound(_))));
    }
}
