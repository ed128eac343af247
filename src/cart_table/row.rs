//! [`Row`] implementation for [`CartItemRow`].

use crate::cart_table::CartError;
use crate::clients::ProductClient;
use crate::model::{CartItemFilter, CartItemInsert, CartItemPatch, CartItemRow, LineId};
use crate::product_table::ProductError;
use async_trait::async_trait;
use table_actor::{Row, TableHandle};
use tracing::debug;

#[async_trait]
impl Row for CartItemRow {
    type Id = LineId;
    type Insert = CartItemInsert;
    type Patch = CartItemPatch;
    type Filter = CartItemFilter;
    type Context = ProductClient;
    type Error = CartError;

    fn from_insert(id: LineId, params: CartItemInsert) -> Result<Self, CartError> {
        if params.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
            quantity: params.quantity,
        })
    }

    fn id(&self) -> &LineId {
        &self.id
    }

    fn matches(&self, filter: &CartItemFilter) -> bool {
        match filter {
            CartItemFilter::User(user_id) => &self.user_id == user_id,
            CartItemFilter::Ids(ids) => ids.contains(&self.id),
        }
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.user_id == existing.user_id && self.product_id == existing.product_id
    }

    /// Only active catalog products can go into a cart.
    async fn on_insert(&mut self, products: &ProductClient) -> Result<(), CartError> {
        debug!(product_id = %self.product_id, "Checking product");
        match products.get(self.product_id.clone()).await {
            Ok(Some(product)) if product.is_active => Ok(()),
            Ok(_) => Err(CartError::ProductUnavailable(self.product_id.to_string())),
            Err(ProductError::NotFound(id)) => Err(CartError::ProductUnavailable(id)),
            Err(e) => Err(CartError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, patch: CartItemPatch, _ctx: &ProductClient) -> Result<(), CartError> {
        if patch.quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }
        self.quantity = patch.quantity;
        Ok(())
    }
}
