//! Catalog module.
//!
//! Product metadata, stock levels, and the lookup ports the cart uses to
//! reach them.

mod lookup;
mod product;
mod stock;

pub use lookup::{ApiCatalog, ProductLookup, StockLookup};
pub use product::Product;
pub use stock::Stock;
