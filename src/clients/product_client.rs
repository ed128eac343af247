//! # Product Client
//!
//! Read access to the catalog for the other tables and the backend, plus the writes the
//! catalog side uses to seed and reprice products.
use crate::model::{Product, ProductFilter, ProductId, ProductInsert, ProductPatch};
use crate::product_table::ProductError;
use async_trait::async_trait;
use table_actor::{TableClient, TableError, TableHandle};
use tracing::{debug, instrument};

/// Client for the products table.
#[derive(Clone)]
pub struct ProductClient {
    inner: TableClient<Product>,
}

impl ProductClient {
    pub fn new(inner: TableClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductInsert) -> Result<Product, ProductError> {
        debug!(?params, "create_product called");
        self.inner
            .insert(params)
            .await
            .map_err(ProductError::from_table)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(ProductError::from_table)
    }

    /// Fetch the given products in catalog order. Unknown ids are skipped.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn products_by_ids(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(ProductFilter::Ids(ids)).await
    }

    #[instrument(skip(self))]
    pub async fn active_products(&self) -> Result<Vec<Product>, ProductError> {
        self.select(ProductFilter::Active).await
    }
}

#[async_trait]
impl TableHandle<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &TableClient<Product> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        ProductError::from_table(e)
    }
}
