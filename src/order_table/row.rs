//! [`Row`] implementation for [`OrderRow`].

use crate::model::{OrderFilter, OrderId, OrderInsert, OrderRow, OrderStatus};
use crate::order_table::OrderError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use table_actor::Row;

#[async_trait]
impl Row for OrderRow {
    type Id = OrderId;
    type Insert = OrderInsert;
    type Patch = ();
    type Filter = OrderFilter;
    type Context = ();
    type Error = OrderError;

    /// Validates the items and that the stated total matches them.
    fn from_insert(id: OrderId, params: OrderInsert) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("an order needs at least one item".into()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "zero quantity for {}",
                item.product_id
            )));
        }
        let missing = params.shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(OrderError::ValidationError(format!(
                "shipping address is missing {}",
                missing.join(", ")
            )));
        }
        let computed: Decimal = params.items.iter().map(|item| item.subtotal()).sum();
        if computed != params.total_amount {
            return Err(OrderError::ValidationError(format!(
                "total {} does not match items {computed}",
                params.total_amount
            )));
        }

        Ok(Self {
            id,
            user_id: params.user_id,
            total_amount: params.total_amount,
            status: OrderStatus::Pending,
            shipping_address: params.shipping_address,
            items: params.items,
        })
    }

    fn id(&self) -> &OrderId {
        &self.id
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::User(user_id) => &self.user_id == user_id,
        }
    }

    async fn on_update(&mut self, _patch: (), _ctx: &()) -> Result<(), OrderError> {
        Err(OrderError::ReadOnly)
    }
}
