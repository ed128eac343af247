//! # Cart & Favorites Store
//!
//! [`CartStore`] mirrors the signed-in user's `cart_items` and `favorites` rows in memory,
//! keeps the derived count and total in step with the lines, and reconciles local edits
//! with the [`Backend`].
//!
//! ## Write Paths
//!
//! | Operation | Local change | When |
//! |---|---|---|
//! | new cart line | append | after the remote insert succeeds |
//! | quantity change | replace quantity | before the remote update |
//! | line removal | remove | before the remote delete |
//! | favorite added | append | after the remote insert succeeds |
//! | favorite removed | remove | before the remote delete |
//!
//! When a write that was applied early fails remotely, the [`SyncPolicy`] decides
//! whether the local change stays (`Observed`) or is undone (`Rollback`). Count and
//! total are recomputed from the lines after every attempt, successful or not.
//!
//! ## Notices
//!
//! Every user-visible outcome is also broadcast as a [`Notice`]; subscribe with
//! [`CartStore::subscribe`]. Operations still return their `Result`, so callers that do
//! not show notices lose nothing.

mod error;
mod notice;
mod policy;

pub use error::StoreError;
pub use notice::Notice;
pub use policy::SyncPolicy;

use crate::backend::Backend;
use crate::config::StoreConfig;
use crate::model::{
    CartLine, CartSnapshot, Favorite, LineId, OrderInsert, OrderItem, OrderRow, Product, ProductId,
    ShippingAddress, UserId,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, warn};

/// In-memory mirror of one user's cart and favorites.
///
/// Mutations take `&mut self`, so edits of the same store never interleave.
pub struct CartStore {
    backend: Arc<dyn Backend>,
    policy: SyncPolicy,
    cart_items: Vec<CartLine>,
    favorites: Vec<Favorite>,
    cart_count: u64,
    total: Decimal,
    is_cart_loading: bool,
    is_favorites_loading: bool,
    notices: broadcast::Sender<Notice>,
}

impl CartStore {
    /// Creates an empty store. Both collections count as loading until the first
    /// [`load_initial_data`](Self::load_initial_data) or [`clear_local_state`](Self::clear_local_state).
    pub fn new(backend: Arc<dyn Backend>, policy: SyncPolicy) -> Self {
        Self::with_capacity(backend, policy, StoreConfig::default().notice_capacity)
    }

    pub fn with_config(backend: Arc<dyn Backend>, config: &StoreConfig) -> Self {
        Self::with_capacity(backend, config.sync_policy, config.notice_capacity)
    }

    fn with_capacity(backend: Arc<dyn Backend>, policy: SyncPolicy, notice_capacity: usize) -> Self {
        let (notices, _) = broadcast::channel(notice_capacity);
        Self {
            backend,
            policy,
            cart_items: Vec::new(),
            favorites: Vec::new(),
            cart_count: 0,
            total: Decimal::ZERO,
            is_cart_loading: true,
            is_favorites_loading: true,
            notices,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn cart_items(&self) -> &[CartLine] {
        &self.cart_items
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Sum of line quantities (the cart badge).
    pub fn cart_count(&self) -> u64 {
        self.cart_count
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_cart_loading(&self) -> bool {
        self.is_cart_loading
    }

    pub fn is_favorites_loading(&self) -> bool {
        self.is_favorites_loading
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::of(&self.cart_items)
    }

    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.iter().any(|fav| &fav.product.id == product_id)
    }

    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.cart_items.iter().find(|line| &line.product.id == product_id)
    }

    /// Receiver for notices emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace local state with the user's cart and favorites.
    ///
    /// Both fetches run concurrently. If either fails the store ends up empty with both
    /// collections marked loaded, and the error is returned. There is no retry.
    #[instrument(skip(self))]
    pub async fn load_initial_data(&mut self, user_id: &UserId) -> Result<(), StoreError> {
        self.is_cart_loading = true;
        self.is_favorites_loading = true;

        let (cart, favorites) = tokio::join!(
            self.backend.fetch_cart(user_id),
            self.backend.fetch_favorites(user_id)
        );

        let result = match (cart, favorites) {
            (Ok(cart), Ok(favorites)) => {
                self.cart_items = cart;
                self.favorites = favorites;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Error loading initial data");
                self.cart_items.clear();
                self.favorites.clear();
                Err(StoreError::from(e))
            }
        };

        self.recompute();
        self.is_cart_loading = false;
        self.is_favorites_loading = false;
        if result.is_ok() {
            info!(
                lines = self.cart_items.len(),
                favorites = self.favorites.len(),
                "Initial data loaded"
            );
        }
        result
    }

    /// Empty both collections and mark them loaded. Used on sign-out.
    pub fn clear_local_state(&mut self) {
        self.cart_items.clear();
        self.favorites.clear();
        self.recompute();
        self.is_cart_loading = false;
        self.is_favorites_loading = false;
        debug!("Local state cleared");
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` units of `product`.
    ///
    /// An existing line for the product grows by `quantity` through the quantity path.
    /// Otherwise a new line is created remotely and appended once the backend returns it.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: u32,
        user_id: &UserId,
    ) -> Result<(), StoreError> {
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity(0));
        }

        let existing = self
            .line_for_product(&product.id)
            .map(|line| (line.id.clone(), line.quantity));

        let result = match existing {
            Some((line_id, current)) => {
                self.apply_quantity(&line_id, current.saturating_add(quantity))
                    .await
            }
            None => self.insert_line(product, quantity, user_id).await,
        };

        match &result {
            Ok(()) => self.emit(Notice::AddedToCart {
                product: product.name.clone(),
            }),
            Err(e) => {
                warn!(error = %e, "Error adding to cart");
                self.emit(Notice::AddToCartFailed);
            }
        }
        result
    }

    async fn insert_line(
        &mut self,
        product: &Product,
        quantity: u32,
        user_id: &UserId,
    ) -> Result<(), StoreError> {
        let line = self
            .backend
            .insert_cart_line(user_id, product, quantity)
            .await?;
        info!(line_id = %line.id, quantity, "Line added");
        self.cart_items.push(line);
        self.recompute();
        Ok(())
    }

    /// Set a line's quantity. Zero or less removes the line.
    #[instrument(skip(self))]
    pub async fn update_quantity(&mut self, line_id: &LineId, new_quantity: i64) -> Result<(), StoreError> {
        if new_quantity <= 0 {
            return self.remove_from_cart(line_id).await;
        }
        let quantity =
            u32::try_from(new_quantity).map_err(|_| StoreError::InvalidQuantity(new_quantity))?;

        let result = self.apply_quantity(line_id, quantity).await;
        if let Err(StoreError::Remote(e)) = &result {
            warn!(error = %e, "Error updating quantity");
            self.emit(Notice::QuantityUpdateFailed);
        }
        result
    }

    /// Optimistic quantity write shared by `update_quantity` and `add_to_cart`.
    async fn apply_quantity(&mut self, line_id: &LineId, quantity: u32) -> Result<(), StoreError> {
        let line = self
            .cart_items
            .iter_mut()
            .find(|line| &line.id == line_id)
            .ok_or_else(|| StoreError::LineNotFound(line_id.clone()))?;
        let previous = std::mem::replace(&mut line.quantity, quantity);
        debug!(%line_id, previous, quantity, "Quantity applied locally");

        let result = self.backend.update_cart_quantity(line_id, quantity).await;
        if result.is_err() && self.policy == SyncPolicy::Rollback {
            if let Some(line) = self.cart_items.iter_mut().find(|line| &line.id == line_id) {
                line.quantity = previous;
                info!(%line_id, quantity = previous, "Quantity rolled back");
            }
        }

        self.recompute();
        result.map_err(StoreError::from)
    }

    /// Remove a line locally, then delete it remotely.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&mut self, line_id: &LineId) -> Result<(), StoreError> {
        let index = self
            .cart_items
            .iter()
            .position(|line| &line.id == line_id)
            .ok_or_else(|| StoreError::LineNotFound(line_id.clone()))?;
        let removed = self.cart_items.remove(index);

        let result = self.backend.delete_cart_line(line_id).await;
        match &result {
            Ok(()) => {
                info!(%line_id, "Line removed");
                self.emit(Notice::RemovedFromCart);
            }
            Err(e) => {
                warn!(%line_id, error = %e, "Error removing from cart");
                if self.policy == SyncPolicy::Rollback {
                    let index = index.min(self.cart_items.len());
                    self.cart_items.insert(index, removed);
                    info!(%line_id, "Removal rolled back");
                }
                self.emit(Notice::RemoveFromCartFailed);
            }
        }

        self.recompute();
        result.map_err(StoreError::from)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Flip the favorite state of `product`. Returns whether it is a favorite afterwards.
    ///
    /// Removal is applied locally before the remote delete; adding waits for the remote
    /// insert.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn toggle_favorite(&mut self, product: &Product, user_id: &UserId) -> Result<bool, StoreError> {
        let Some(index) = self
            .favorites
            .iter()
            .position(|fav| fav.product.id == product.id)
        else {
            return match self.backend.insert_favorite(user_id, product).await {
                Ok(favorite) => {
                    info!(favorite_id = %favorite.id, "Favorite added");
                    self.favorites.push(favorite);
                    Ok(true)
                }
                Err(e) => {
                    warn!(error = %e, "Error adding favorite");
                    self.emit(Notice::FavoriteUpdateFailed);
                    Err(e.into())
                }
            };
        };

        let removed = self.favorites.remove(index);
        let result = self.backend.delete_favorite(&removed.id).await;
        match result {
            Ok(()) => {
                info!(favorite_id = %removed.id, "Favorite removed");
                Ok(false)
            }
            Err(e) => {
                warn!(favorite_id = %removed.id, error = %e, "Error removing favorite");
                if self.policy == SyncPolicy::Rollback {
                    let index = index.min(self.favorites.len());
                    self.favorites.insert(index, removed);
                }
                self.emit(Notice::FavoriteUpdateFailed);
                Err(e.into())
            }
        }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Place an order for the whole cart, then empty the cart.
    ///
    /// Nothing is sent when the cart is empty or the address is incomplete; both cases are
    /// announced with a notice like any other failed checkout. Once the order
    /// exists, a failure to delete the ordered lines remotely is logged but does not fail
    /// the checkout.
    #[instrument(skip(self, shipping_address))]
    pub async fn checkout(
        &mut self,
        user_id: &UserId,
        shipping_address: &ShippingAddress,
    ) -> Result<OrderRow, StoreError> {
        if self.cart_items.is_empty() {
            self.emit(Notice::CartEmpty);
            return Err(StoreError::EmptyCart);
        }
        let missing = shipping_address.missing_fields();
        if !missing.is_empty() {
            self.emit(Notice::ShippingIncomplete);
            return Err(StoreError::IncompleteAddress(missing.join(", ")));
        }

        let order = OrderInsert {
            user_id: user_id.clone(),
            total_amount: self.total,
            shipping_address: shipping_address.clone(),
            items: self
                .cart_items
                .iter()
                .map(|line| OrderItem {
                    product_id: line.product.id.clone(),
                    quantity: line.quantity,
                    unit_price: line.product.effective_price(),
                })
                .collect(),
        };

        let placed = match self.backend.insert_order(order).await {
            Ok(placed) => placed,
            Err(e) => {
                warn!(error = %e, "Error placing order");
                self.emit(Notice::CheckoutFailed);
                return Err(e.into());
            }
        };
        info!(order_id = %placed.id, total = %placed.total_amount, "Order placed");

        let ordered: Vec<LineId> = self.cart_items.iter().map(|line| line.id.clone()).collect();
        if let Err(e) = self.backend.delete_cart_lines(&ordered).await {
            warn!(order_id = %placed.id, error = %e, "Ordered lines were not cleared remotely");
        }
        self.cart_items.clear();
        self.recompute();

        self.emit(Notice::OrderPlaced {
            order_id: placed.id.clone(),
        });
        Ok(placed)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn recompute(&mut self) {
        let snapshot = CartSnapshot::of(&self.cart_items);
        self.cart_count = snapshot.item_count;
        self.total = snapshot.total;
    }

    fn emit(&self, notice: Notice) {
        debug!(%notice, "Notice");
        // no subscribers is fine
        let _ = self.notices.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TableBackend;
    use crate::clients::{CartClient, FavoriteClient, OrderClient, ProductClient};
    use crate::model::CartItemRow;
    use table_actor::mock::MockTable;
    use table_actor::TableError;

    struct Tables {
        products: MockTable<Product>,
        cart: MockTable<CartItemRow>,
        favorites: MockTable<crate::model::FavoriteRow>,
        orders: MockTable<OrderRow>,
    }

    impl Tables {
        fn new() -> Self {
            Self {
                products: MockTable::new(),
                cart: MockTable::new(),
                favorites: MockTable::new(),
                orders: MockTable::new(),
            }
        }

        fn store(&self, policy: SyncPolicy) -> CartStore {
            let backend = TableBackend::new(
                ProductClient::new(self.products.client()),
                CartClient::new(self.cart.client()),
                FavoriteClient::new(self.favorites.client()),
                OrderClient::new(self.orders.client()),
            );
            CartStore::new(Arc::new(backend), policy)
        }
    }

    fn mug() -> Product {
        Product::new("product_1", "Mug", Decimal::from(10))
    }

    #[tokio::test]
    async fn test_new_store_is_loading_and_empty() {
        let tables = Tables::new();
        let store = tables.store(SyncPolicy::Observed);

        assert!(store.is_cart_loading());
        assert!(store.is_favorites_loading());
        assert!(store.cart_items().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_zero_add_and_unknown_line_never_reach_the_backend() {
        let tables = Tables::new();
        let mut store = tables.store(SyncPolicy::Observed);
        let user = UserId::new("user_1");

        assert_eq!(
            store.add_to_cart(&mug(), 0, &user).await,
            Err(StoreError::InvalidQuantity(0))
        );
        assert_eq!(
            store.update_quantity(&LineId::new("cart_9"), 2).await,
            Err(StoreError::LineNotFound(LineId::new("cart_9")))
        );
        assert_eq!(
            store.remove_from_cart(&LineId::new("cart_9")).await,
            Err(StoreError::LineNotFound(LineId::new("cart_9")))
        );

        tables.cart.verify();
    }

    #[tokio::test]
    async fn test_clear_local_state_marks_loaded() {
        let mut tables = Tables::new();
        tables.cart.expect_insert().return_ok(CartItemRow {
            id: LineId::new("cart_1"),
            user_id: UserId::new("user_1"),
            product_id: mug().id,
            quantity: 2,
        });
        let mut store = tables.store(SyncPolicy::Observed);
        store.add_to_cart(&mug(), 2, &UserId::new("user_1")).await.unwrap();
        assert_eq!(store.cart_count(), 2);

        store.clear_local_state();
        assert!(store.cart_items().is_empty());
        assert_eq!(store.cart_count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
        assert!(!store.is_cart_loading());
        assert!(!store.is_favorites_loading());
    }

    #[tokio::test]
    async fn test_notice_reaches_subscriber() {
        let mut tables = Tables::new();
        tables
            .cart
            .expect_insert()
            .return_err(TableError::TableClosed);
        let mut store = tables.store(SyncPolicy::Observed);
        let mut notices = store.subscribe();

        let result = store.add_to_cart(&mug(), 1, &UserId::new("user_1")).await;
        assert!(matches!(result, Err(StoreError::Remote(_))));

        let notice = notices.recv().await.unwrap();
        assert_eq!(notice, Notice::AddToCartFailed);
        assert!(notice.is_error());
    }
}
