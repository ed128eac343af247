//! # Favorite Client
use crate::favorite_table::FavoriteError;
use crate::model::{FavoriteFilter, FavoriteInsert, FavoriteRow, UserId};
use async_trait::async_trait;
use table_actor::{TableClient, TableError, TableHandle};
use tracing::{debug, instrument};

/// Client for the favorites table. Removal goes through [`TableHandle::delete`].
#[derive(Clone)]
pub struct FavoriteClient {
    inner: TableClient<FavoriteRow>,
}

impl FavoriteClient {
    pub fn new(inner: TableClient<FavoriteRow>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id, product_id = %params.product_id))]
    pub async fn add_favorite(&self, params: FavoriteInsert) -> Result<FavoriteRow, FavoriteError> {
        debug!("Sending request");
        self.inner
            .insert(params)
            .await
            .map_err(FavoriteError::from_table)
    }

    #[instrument(skip(self))]
    pub async fn favorites_for_user(&self, user_id: UserId) -> Result<Vec<FavoriteRow>, FavoriteError> {
        self.select(FavoriteFilter::User(user_id)).await
    }
}

#[async_trait]
impl TableHandle<FavoriteRow> for FavoriteClient {
    type Error = FavoriteError;

    fn inner(&self) -> &TableClient<FavoriteRow> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        FavoriteError::from_table(e)
    }
}
