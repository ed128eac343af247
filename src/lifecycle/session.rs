use crate::model::{LineId, OrderRow, Product, ShippingAddress, UserId};
use crate::store::{CartStore, StoreError};
use tracing::{info, warn};

/// A signed-in user and the store that mirrors their cart.
///
/// The store lives exactly as long as the session: [`sign_in`](Self::sign_in) loads it,
/// [`sign_out`](Self::sign_out) clears it and gives it back for the next user.
pub struct ShopSession {
    user_id: UserId,
    store: CartStore,
}

impl ShopSession {
    /// Bind `store` to `user_id` and load their data.
    ///
    /// A failed load does not block sign-in: the session starts with an empty,
    /// loaded store and [`refresh`](Self::refresh) can be retried.
    pub async fn sign_in(mut store: CartStore, user_id: UserId) -> Self {
        info!(%user_id, "Signing in");
        if let Err(e) = store.load_initial_data(&user_id).await {
            warn!(%user_id, error = %e, "Signed in without cart data");
        }
        Self { user_id, store }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Reload cart and favorites from the backend, e.g. when a screen regains focus.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.store.load_initial_data(&self.user_id).await
    }

    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<(), StoreError> {
        self.store.add_to_cart(product, quantity, &self.user_id).await
    }

    pub async fn update_quantity(&mut self, line_id: &LineId, quantity: i64) -> Result<(), StoreError> {
        self.store.update_quantity(line_id, quantity).await
    }

    pub async fn remove_from_cart(&mut self, line_id: &LineId) -> Result<(), StoreError> {
        self.store.remove_from_cart(line_id).await
    }

    pub async fn toggle_favorite(&mut self, product: &Product) -> Result<bool, StoreError> {
        self.store.toggle_favorite(product, &self.user_id).await
    }

    pub async fn checkout(&mut self, shipping_address: &ShippingAddress) -> Result<OrderRow, StoreError> {
        self.store.checkout(&self.user_id, shipping_address).await
    }

    /// End the session. Returns the emptied store.
    pub fn sign_out(mut self) -> CartStore {
        info!(user_id = %self.user_id, "Signing out");
        self.store.clear_local_state();
        self.store
    }
}
