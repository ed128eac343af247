//! # Order Client
use crate::model::{OrderFilter, OrderInsert, OrderRow, UserId};
use crate::order_table::OrderError;
use async_trait::async_trait;
use table_actor::{TableClient, TableError, TableHandle};
use tracing::{debug, info, instrument};

/// Client for the orders table.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<OrderRow>,
}

impl OrderClient {
    pub fn new(inner: TableClient<OrderRow>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(user_id = %order.user_id, total = %order.total_amount))]
    pub async fn place_order(&self, order: OrderInsert) -> Result<OrderRow, OrderError> {
        debug!(?order, "place_order called");
        info!(items = order.items.len(), "Sending place_order to table");
        self.inner.insert(order).await.map_err(OrderError::from_table)
    }

    #[instrument(skip(self))]
    pub async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<OrderRow>, OrderError> {
        self.select(OrderFilter::User(user_id)).await
    }
}

#[async_trait]
impl TableHandle<OrderRow> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<OrderRow> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        OrderError::from_table(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShippingAddress;
    use rust_decimal::Decimal;
    use table_actor::mock::MockTable;

    #[tokio::test]
    async fn test_validation_error_survives_the_table() {
        let mut mock = MockTable::<OrderRow>::new();
        mock.expect_insert()
            .return_err(TableError::Rejected(Box::new(OrderError::ValidationError(
                "an order needs at least one item".into(),
            ))));
        mock.expect_select()
            .return_err(TableError::TableClosed);

        let client = OrderClient::new(mock.client());
        let order = OrderInsert {
            user_id: UserId::new("user_1"),
            total_amount: Decimal::ZERO,
            shipping_address: ShippingAddress::new("Ada", "555-0101", "12 Loom St", "London"),
            items: vec![],
        };
        assert_eq!(
            client.place_order(order).await,
            Err(OrderError::ValidationError("an order needs at least one item".into()))
        );
        assert!(matches!(
            client.orders_for_user(UserId::new("user_1")).await,
            Err(OrderError::ActorCommunicationError(_))
        ));
        mock.verify();
    }
}
