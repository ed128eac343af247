//! # Order Table
//!
//! The `orders` table. An order is written once at checkout with its items embedded
//! and is read-only from then on.

pub mod error;
pub mod row;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::{OrderId, OrderRow};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use table_actor::TableActor;

/// Creates the orders table and its client.
pub fn new(buffer_size: usize) -> (TableActor<OrderRow>, OrderClient) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        OrderId::new(format!("order_{id}"))
    };

    let (actor, generic_client) = TableActor::new(buffer_size, next_order_id);
    (actor, OrderClient::new(generic_client))
}
