//! Cart error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur while mutating or loading a cart.
///
/// None of these escape [`CartStore`](crate::cart::CartStore) operations;
/// they are logged and mapped to a user-facing notification instead.
#[derive(Error, Debug)]
pub enum CartError {
    /// Requested amount exceeds available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Product is not in the cart.
    #[error("Product not in cart: {0}")]
    ProductNotInCart(ProductId),

    /// Requested amount is below 1.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Stock or product lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(#[from] rocket_data::FetchError),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] rocket_cache::CacheError),

    /// A decoded cart breaks the cart invariants.
    #[error("Invalid cart: {0}")]
    InvalidCart(String),
}
