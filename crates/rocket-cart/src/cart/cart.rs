//! Cart and line item types.
//!
//! A [`Cart`] is an immutable snapshot. Mutating methods take `&self` and
//! return the successor cart, leaving the original untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// One distinct product in the cart with its requested amount.
///
/// Serializes flat: product fields and `amount` are siblings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// The product, as fetched from the catalog.
    #[serde(flatten)]
    pub product: Product,
    /// Requested amount. Always at least 1.
    pub amount: i64,
}

impl LineItem {
    /// Create a line item with amount 1.
    ///
    /// An `amount` field in the product metadata is dropped so it cannot
    /// shadow the cart amount.
    pub fn new(mut product: Product) -> Self {
        product.attributes.shift_remove("amount");
        Self { product, amount: 1 }
    }

    /// Product identifier.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount, if the product has a price.
    pub fn subtotal(&self) -> Option<Money> {
        self.product.price()?.try_multiply(self.amount)
    }
}

/// A shopping cart: line items in insertion order, unique by product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get an item by product ID.
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all items.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.amount).sum()
    }

    /// Sum of all item subtotals. Items without a price count as zero.
    pub fn total(&self) -> Result<Money, CartError> {
        let currency = Currency::default();
        let subtotals: Vec<Money> = self.items.iter().filter_map(LineItem::subtotal).collect();
        Money::try_sum(subtotals.iter(), currency)
            .ok_or_else(|| CartError::InvalidCart("total overflow".to_string()))
    }

    /// Successor with `product` appended at amount 1.
    ///
    /// If the product is already present its amount is incremented instead,
    /// so the result never holds duplicates.
    pub fn with_product(&self, product: Product) -> Cart {
        if self.contains(product.id) {
            if let Ok(cart) = self.with_incremented(product.id) {
                return cart;
            }
        }
        let mut items = self.items.clone();
        items.push(LineItem::new(product));
        Cart { items }
    }

    /// Successor with the product's amount incremented by one.
    pub fn with_incremented(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let current = self
            .get(product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?
            .amount;
        self.with_amount(product_id, current.saturating_add(1))
    }

    /// Successor with the product's amount replaced.
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Result<Cart, CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        if !self.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.product.id == product_id {
                    LineItem {
                        product: item.product.clone(),
                        amount,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Cart { items })
    }

    /// Successor without the product.
    pub fn without(&self, product_id: ProductId) -> Result<Cart, CartError> {
        if !self.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }
        let items = self
            .items
            .iter()
            .filter(|i| i.product.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.amount < 1 {
                return Err(CartError::InvalidCart(format!(
                    "product {} has amount {}",
                    item.product.id, item.amount
                )));
            }
            if !seen.insert(item.product.id) {
                return Err(CartError::InvalidCart(format!(
                    "product {} appears twice",
                    item.product.id
                )));
            }
        }
        Ok(Self { items })
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shoe(id: i64, price: f64) -> Product {
        Product::new(id)
            .with_attribute("title", format!("Shoe {id}"))
            .with_attribute("price", price)
    }

    fn cart_of(entries: &[(i64, i64)]) -> Cart {
        let items = entries
            .iter()
            .map(|&(id, amount)| LineItem {
                product: shoe(id, 100.0),
                amount,
            })
            .collect::<Vec<_>>();
        Cart::try_from(items).unwrap()
    }

    #[test]
    fn test_line_item_keeps_product_field_order() {
        let json = r#"{"id":1,"title":"T","price":1.0,"amount":9,"image":"i","brand":"b"}"#;
        let item = LineItem::new(serde_json::from_str(json).unwrap());

        assert_eq!(
            serde_json::to_string(&item).unwrap(),
            r#"{"id":1,"title":"T","price":1.0,"image":"i","brand":"b","amount":1}"#
        );
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_with_product_appends() {
        let cart = cart_of(&[(1, 2)]);
        let next = cart.with_product(shoe(5, 50.0));

        assert_eq!(next.unique_item_count(), 2);
        assert_eq!(next.items()[1].product_id(), ProductId::new(5));
        assert_eq!(next.items()[1].amount, 1);
        // Original snapshot untouched
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn test_with_product_existing_increments() {
        let cart = cart_of(&[(1, 2)]);
        let next = cart.with_product(shoe(1, 100.0));

        assert_eq!(next.unique_item_count(), 1);
        assert_eq!(next.get(ProductId::new(1)).unwrap().amount, 3);
    }

    #[test]
    fn test_line_item_drops_product_amount() {
        let product = Product::new(9).with_attribute("amount", 40);
        let item = LineItem::new(product);
        assert_eq!(item.amount, 1);
        assert_eq!(serde_json::to_string(&item).unwrap(), r#"{"id":9,"amount":1}"#);
    }

    #[test]
    fn test_with_amount_preserves_order_and_fields() {
        let cart = cart_of(&[(1, 1), (2, 1), (3, 1)]);
        let next = cart.with_amount(ProductId::new(2), 4).unwrap();

        let ids: Vec<i64> = next.iter().map(|i| i.product_id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        let item = next.get(ProductId::new(2)).unwrap();
        assert_eq!(item.amount, 4);
        assert_eq!(item.product.title(), Some("Shoe 2"));
    }

    #[test]
    fn test_with_amount_rejects_invalid() {
        let cart = cart_of(&[(1, 1)]);
        assert!(matches!(
            cart.with_amount(ProductId::new(1), 0),
            Err(CartError::InvalidAmount(0))
        ));
        assert!(matches!(
            cart.with_amount(ProductId::new(7), 2),
            Err(CartError::ProductNotInCart(_))
        ));
    }

    #[test]
    fn test_without() {
        let cart = cart_of(&[(1, 1), (2, 3), (3, 1)]);
        let next = cart.without(ProductId::new(2)).unwrap();

        let ids: Vec<i64> = next.iter().map(|i| i.product_id().get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(matches!(
            next.without(ProductId::new(2)),
            Err(CartError::ProductNotInCart(_))
        ));
    }

    #[test]
    fn test_counts_and_total() {
        let cart = Cart::new()
            .with_product(shoe(1, 179.9))
            .with_product(shoe(2, 139.9))
            .with_product(Product::new(3));
        let cart = cart.with_amount(ProductId::new(1), 2).unwrap();

        assert_eq!(cart.unique_item_count(), 3);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(
            cart.get(ProductId::new(1)).unwrap().subtotal().unwrap().amount_cents,
            35980
        );
        assert_eq!(cart.get(ProductId::new(3)).unwrap().subtotal(), None);
        assert_eq!(cart.total().unwrap().display(), "R$ 499,70");
    }

    #[test]
    fn test_serialized_form_is_flat_array() {
        let cart = Cart::new().with_product(Product::new(5).with_attribute("title", "Shoe"));
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":5,"title":"Shoe","amount":1}]"#);

        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_decode_rejects_duplicates() {
        let json = r#"[{"id":1,"amount":1},{"id":1,"amount":2}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_non_positive_amount() {
        let json = r#"[{"id":1,"amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(serde_json::from_str::<Cart>(r#"{"items":[]}"#).is_err());
        assert!(serde_json::from_str::<Cart>(r#"[{"title":"no id","amount":1}]"#).is_err());
    }
}
