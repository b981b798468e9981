//! Lookup ports and the HTTP-backed catalog.

use async_trait::async_trait;
use rocket_data::{DependencyTag, FetchClient, FetchError};

use crate::catalog::{Product, Stock};
use crate::ids::ProductId;

/// Source of current stock levels.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Get the available stock for `product_id`.
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError>;
}

/// Source of product metadata.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Get the product with `product_id`.
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError>;
}

/// Storefront API client serving both lookups.
///
/// - `GET {base}/stock/{id}` -> `{ "amount": n }`
/// - `GET {base}/products/{id}` -> `{ "id": n, "title": ..., ... }`
#[derive(Debug, Clone)]
pub struct ApiCatalog {
    client: FetchClient,
}

impl ApiCatalog {
    /// Create a catalog over an existing fetch client.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// Get the underlying fetch client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl StockLookup for ApiCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        self.client
            .fetch(&format!("stock/{product_id}"), DependencyTag::Inventory)
            .await
    }
}

#[async_trait]
impl ProductLookup for ApiCatalog {
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        let product: Product = self
            .client
            .fetch(&format!("products/{product_id}"), DependencyTag::Catalog)
            .await?;

        if product.id != product_id {
            return Err(FetchError::Deserialization(format!(
                "requested product {product_id}, got {}",
                product.id
            )));
        }
        Ok(product)
    }
}
