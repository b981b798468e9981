//! Stock levels.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// Available stock for a product, as returned by `GET stock/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the stock belongs to. Some API versions omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            id: Some(id.into()),
            amount,
        }
    }

    /// Check if one more unit can be added on top of `in_cart`.
    ///
    /// Strict: the increment is refused once the cart already holds as many
    /// units as are in stock.
    pub fn allows_increment(&self, in_cart: i64) -> bool {
        self.amount > in_cart
    }

    /// Check if exactly `amount` units can be held in the cart.
    pub fn can_fulfill(&self, amount: i64) -> bool {
        self.amount >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_is_strict() {
        let stock = Stock::new(1, 3);
        assert!(stock.allows_increment(2));
        assert!(!stock.allows_increment(3));
        assert!(!stock.allows_increment(4));
    }

    #[test]
    fn test_fulfill_is_inclusive() {
        let stock = Stock::new(1, 3);
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
    }

    #[test]
    fn test_decode_without_id() {
        let stock: Stock = serde_json::from_str(r#"{"amount":5}"#).unwrap();
        assert_eq!(stock.id, None);
        assert_eq!(stock.amount, 5);
    }
}
