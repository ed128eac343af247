//! [`Row`] implementation for [`FavoriteRow`].

use crate::clients::ProductClient;
use crate::favorite_table::FavoriteError;
use crate::model::{FavoriteFilter, FavoriteId, FavoriteInsert, FavoriteRow};
use async_trait::async_trait;
use table_actor::{Row, TableHandle};

#[async_trait]
impl Row for FavoriteRow {
    type Id = FavoriteId;
    type Insert = FavoriteInsert;
    type Patch = ();
    type Filter = FavoriteFilter;
    type Context = ProductClient;
    type Error = FavoriteError;

    fn from_insert(id: FavoriteId, params: FavoriteInsert) -> Result<Self, FavoriteError> {
        Ok(Self {
            id,
            user_id: params.user_id,
            product_id: params.product_id,
        })
    }

    fn id(&self) -> &FavoriteId {
        &self.id
    }

    fn matches(&self, filter: &FavoriteFilter) -> bool {
        match filter {
            FavoriteFilter::User(user_id) => &self.user_id == user_id,
        }
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.user_id == existing.user_id && self.product_id == existing.product_id
    }

    async fn on_insert(&mut self, products: &ProductClient) -> Result<(), FavoriteError> {
        match products.get(self.product_id.clone()).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(FavoriteError::UnknownProduct(self.product_id.to_string())),
            Err(e) => Err(FavoriteError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, _patch: (), _ctx: &ProductClient) -> Result<(), FavoriteError> {
        Err(FavoriteError::ReadOnly)
    }
}
