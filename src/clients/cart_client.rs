//! # Cart Client
//!
//! Typed access to the `cart_items` table.
use crate::cart_table::CartError;
use crate::model::{CartItemFilter, CartItemInsert, CartItemPatch, CartItemRow, LineId, UserId};
use async_trait::async_trait;
use table_actor::{TableClient, TableError, TableHandle};
use tracing::{debug, instrument};

/// Client for the cart table.
#[derive(Clone)]
pub struct CartClient {
    inner: TableClient<CartItemRow>,
}

impl CartClient {
    pub fn new(inner: TableClient<CartItemRow>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id, product_id = %params.product_id))]
    pub async fn add_line(&self, params: CartItemInsert) -> Result<CartItemRow, CartError> {
        debug!(quantity = params.quantity, "Sending request");
        self.inner.insert(params).await.map_err(CartError::from_table)
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(&self, id: LineId, quantity: u32) -> Result<CartItemRow, CartError> {
        debug!("Sending request");
        self.inner
            .update(id, CartItemPatch { quantity })
            .await
            .map_err(CartError::from_table)
    }

    #[instrument(skip(self))]
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartItemRow>, CartError> {
        self.select(CartItemFilter::User(user_id)).await
    }

    /// Delete the given lines in one request. Returns how many existed.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn remove_lines(&self, ids: Vec<LineId>) -> Result<usize, CartError> {
        debug!(?ids, "Sending request");
        self.inner
            .delete_where(CartItemFilter::Ids(ids))
            .await
            .map_err(CartError::from_table)
    }
}

#[async_trait]
impl TableHandle<CartItemRow> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &TableClient<CartItemRow> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        CartError::from_table(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use table_actor::mock::{create_mock_table, expect_delete_where, expect_update, MockTable};

    fn row(id: &str, quantity: u32) -> CartItemRow {
        CartItemRow {
            id: LineId::new(id),
            user_id: UserId::new("user_1"),
            product_id: ProductId::new("product_1"),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_set_quantity_sends_patch() {
        let (client, mut receiver) = create_mock_table::<CartItemRow>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move { cart_client.set_quantity(LineId::new("cart_1"), 4).await });

        let (id, patch, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, LineId::new("cart_1"));
        assert_eq!(patch.quantity, 4);
        responder.send(Ok(row("cart_1", 4))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().quantity, 4);
    }

    #[tokio::test]
    async fn test_remove_lines_filters_by_id() {
        let (client, mut receiver) = create_mock_table::<CartItemRow>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move {
            cart_client
                .remove_lines(vec![LineId::new("cart_1"), LineId::new("cart_2")])
                .await
        });

        let (filter, responder) = expect_delete_where(&mut receiver)
            .await
            .expect("Expected DeleteWhere request");
        match filter {
            CartItemFilter::Ids(ids) => assert_eq!(ids.len(), 2),
            other => panic!("Expected Ids filter, got {other:?}"),
        }
        responder.send(Ok(2)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_table_errors_are_classified() {
        let mut mock = MockTable::<CartItemRow>::new();
        mock.expect_insert()
            .return_err(TableError::Conflict("cart_2 duplicates cart_1".into()));
        mock.expect_update()
            .return_err(TableError::Rejected(Box::new(CartError::InvalidQuantity(0))));
        mock.expect_delete().return_err(TableError::TableClosed);

        let client = CartClient::new(mock.client());
        let insert = CartItemInsert {
            user_id: UserId::new("user_1"),
            product_id: ProductId::new("product_1"),
            quantity: 1,
        };
        assert!(matches!(client.add_line(insert).await, Err(CartError::Duplicate(_))));
        assert_eq!(
            client.set_quantity(LineId::new("cart_1"), 0).await,
            Err(CartError::InvalidQuantity(0))
        );
        assert!(matches!(
            client.delete(LineId::new("cart_1")).await,
            Err(CartError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
