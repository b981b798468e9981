//! Shopping cart state container for the RocketShoes storefront.
//!
//! This crate provides:
//!
//! - **Catalog**: products, stock levels, and the lookup ports that fetch them
//! - **Cart**: immutable cart snapshots with line items and totals
//! - **Store**: [`CartStore`](cart::CartStore), which validates mutations against
//!   stock, persists every committed cart, and notifies the shopper on failure
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::prelude::*;
//!
//! let catalog = Arc::new(ApiCatalog::new(FetchClient::new("http://localhost:3333")?));
//! let store = CartStore::new(Cache::open("storage.json")?, catalog, Arc::new(LogSink));
//!
//! store.add_product(ProductId::new(1)).await;
//! store.update_product_amount(ProductId::new(1), 3).await;
//!
//! let cart = store.cart();
//! println!("Total: {}", cart.total()?);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{ApiCatalog, Product, ProductLookup, Stock, StockLookup};

    // Cart
    pub use crate::cart::{
        Cart, CartOperation, CartStore, LineItem, LogSink, MutationOutcome, NotificationSink,
        RecordingSink, CART_STORAGE_KEY,
    };

    pub use rocket_cache::Cache;
    pub use rocket_data::{FetchClient, FetchError};
}
