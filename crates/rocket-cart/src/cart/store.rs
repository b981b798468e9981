//! The cart state container.

use std::sync::Arc;

use rocket_cache::Cache;
use tokio::sync::{watch, Mutex};

use crate::cart::notify::{CartOperation, NotificationSink};
use crate::cart::{Cart, CART_STORAGE_KEY};
use crate::catalog::{ProductLookup, StockLookup};
use crate::error::CartError;
use crate::ids::ProductId;

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new cart was persisted and published.
    Committed,
    /// The operation failed; a notification was sent and the cart is unchanged.
    Rejected,
    /// The request was invalid and silently dropped.
    Ignored,
}

impl MutationOutcome {
    /// Check if the cart changed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

struct Inner {
    cache: Cache,
    stock: Arc<dyn StockLookup>,
    products: Arc<dyn ProductLookup>,
    notifier: Arc<dyn NotificationSink>,
    snapshot: watch::Sender<Arc<Cart>>,
    /// Held for the whole read-lookup-persist-publish sequence of a mutation.
    writer: Mutex<()>,
}

/// Shared handle to the shopper's cart.
///
/// Holds the current [`Cart`] snapshot and funnels every change through
/// [`add_product`](Self::add_product), [`remove_product`](Self::remove_product)
/// and [`update_product_amount`](Self::update_product_amount). Mutations are
/// serialized: each one re-reads the latest committed snapshot, so two rapid
/// adds of the same product both land.
///
/// Failures never surface as errors. They are logged, reported once through
/// the [`NotificationSink`], and leave the cart untouched.
///
/// Cloning is cheap; clones share state.
///
/// # Example
///
/// ```rust,ignore
/// let catalog = Arc::new(ApiCatalog::new(FetchClient::new("http://localhost:3333")?));
/// let store = CartStore::new(Cache::open("storage.json")?, catalog, Arc::new(LogSink));
///
/// store.add_product(ProductId::new(1)).await;
/// println!("{} items", store.cart().unique_item_count());
/// ```
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl CartStore {
    /// Create a store whose stock and product lookups share one catalog.
    ///
    /// Reads the persisted cart from `cache` once; an absent or unreadable
    /// value yields an empty cart.
    pub fn new<C>(cache: Cache, catalog: Arc<C>, notifier: Arc<dyn NotificationSink>) -> Self
    where
        C: StockLookup + ProductLookup + 'static,
    {
        Self::with_lookups(cache, catalog.clone(), catalog, notifier)
    }

    /// Create a store with separate stock and product lookups.
    pub fn with_lookups(
        cache: Cache,
        stock: Arc<dyn StockLookup>,
        products: Arc<dyn ProductLookup>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let cart = load_cart(&cache);
        tracing::debug!(items = cart.unique_item_count(), "cart loaded");

        let (snapshot, _) = watch::channel(Arc::new(cart));
        Self {
            inner: Arc::new(Inner {
                cache,
                stock,
                products,
                notifier,
                snapshot,
                writer: Mutex::new(()),
            }),
        }
    }

    /// Current cart snapshot.
    pub fn cart(&self) -> Arc<Cart> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to cart changes. The receiver sees every committed snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.inner.snapshot.subscribe()
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is fetched from the catalog and appended
    /// with amount 1. A product already in the cart is incremented, provided
    /// stock is strictly greater than the amount already held.
    pub async fn add_product(&self, product_id: ProductId) -> MutationOutcome {
        let _writer = self.inner.writer.lock().await;
        let result = self.try_add(product_id).await;
        self.settle(CartOperation::Add, product_id, result)
    }

    /// Remove a product entirely.
    pub async fn remove_product(&self, product_id: ProductId) -> MutationOutcome {
        let _writer = self.inner.writer.lock().await;
        let result = self
            .cart()
            .without(product_id)
            .and_then(|next| self.commit(next));
        self.settle(CartOperation::Remove, product_id, result)
    }

    /// Set a product's amount.
    ///
    /// Amounts below 1 are ignored without notification. Otherwise stock must
    /// cover the full `amount`.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> MutationOutcome {
        if amount < 1 {
            return self.settle(
                CartOperation::UpdateAmount,
                product_id,
                Err(CartError::InvalidAmount(amount)),
            );
        }

        let _writer = self.inner.writer.lock().await;
        let result = self.try_update(product_id, amount).await;
        self.settle(CartOperation::UpdateAmount, product_id, result)
    }

    async fn try_add(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let current = self.cart();

        let next = match current.get(product_id) {
            Some(item) => {
                let stock = self.inner.stock.stock(product_id).await?;
                if !stock.allows_increment(item.amount) {
                    return Err(CartError::StockExceeded {
                        product_id,
                        requested: item.amount.saturating_add(1),
                        available: stock.amount,
                    });
                }
                current.with_incremented(product_id)?
            }
            None => {
                let product = self.inner.products.product(product_id).await?;
                current.with_product(product)
            }
        };

        self.commit(next)
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> Result<Arc<Cart>, CartError> {
        let stock = self.inner.stock.stock(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let next = self.cart().with_amount(product_id, amount)?;
        self.commit(next)
    }

    /// Persist `next`, then publish it. Nothing is published if persisting fails.
    fn commit(&self, next: Cart) -> Result<Arc<Cart>, CartError> {
        self.inner.cache.set(CART_STORAGE_KEY, &next)?;
        let next = Arc::new(next);
        self.inner.snapshot.send_replace(next.clone());
        Ok(next)
    }

    fn settle(
        &self,
        operation: CartOperation,
        product_id: ProductId,
        result: Result<Arc<Cart>, CartError>,
    ) -> MutationOutcome {
        let error = match result {
            Ok(cart) => {
                tracing::debug!(
                    %operation,
                    %product_id,
                    amount = cart.get(product_id).map(|i| i.amount),
                    items = cart.unique_item_count(),
                    "cart committed"
                );
                return MutationOutcome::Committed;
            }
            Err(error) => error,
        };

        match operation.message_for(&error) {
            Some(message) => {
                tracing::warn!(%operation, %product_id, %error, "cart mutation rejected");
                self.inner.notifier.error(message);
                MutationOutcome::Rejected
            }
            None => {
                tracing::debug!(%operation, %product_id, %error, "cart mutation ignored");
                MutationOutcome::Ignored
            }
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart())
            .finish_non_exhaustive()
    }
}

/// Decode the persisted cart, falling back to empty on any mismatch.
fn load_cart(cache: &Cache) -> Cart {
    match cache.get::<Cart>(CART_STORAGE_KEY) {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(error) => {
            tracing::warn!(key = CART_STORAGE_KEY, %error, "discarding unreadable persisted cart");
            Cart::new()
        }
    }
}
