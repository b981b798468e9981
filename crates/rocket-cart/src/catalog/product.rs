//! Product metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A product as returned by the catalog API.
///
/// Only `id` is interpreted by the cart. Every other field (`title`,
/// `price`, `image`, and anything else the API sends) is carried verbatim
/// in `attributes`, so a persisted line item reproduces the API payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Remaining metadata fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Create a product with no metadata.
    pub fn new(id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Set a metadata field.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display title, if present.
    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }

    /// Image URL, if present.
    pub fn image(&self) -> Option<&str> {
        self.attributes.get("image").and_then(Value::as_str)
    }

    /// Unit price, if present and numeric.
    pub fn price(&self) -> Option<Money> {
        self.attributes
            .get("price")
            .and_then(Value::as_f64)
            .map(|p| Money::from_decimal(p, Currency::BRL))
    }
}
