//! # Cart Table
//!
//! The `cart_items` table: one row per (user, product) with a positive quantity.
//!
//! ## Rules
//!
//! - Quantity is at least 1 on insert and on update. Lowering a line to zero is the
//!   caller's job (delete the row); the table never stores a zero-quantity line.
//! - A user holds at most one line per product. A second insert is a
//!   [`TableError::Conflict`](table_actor::TableError::Conflict); callers add to the
//!   existing line instead.
//! - The product must exist and be active. Rows consult the products table through
//!   the [`ProductClient`] injected with `run(product_client)`.

pub mod error;
pub mod row;

pub use error::*;

use crate::clients::CartClient;
use crate::model::{CartItemRow, LineId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use table_actor::TableActor;

/// Creates the cart table and its client. Run it with a [`ProductClient`](crate::clients::ProductClient).
pub fn new(buffer_size: usize) -> (TableActor<CartItemRow>, CartClient) {
    let line_id_counter = Arc::new(AtomicU64::new(1));
    let next_line_id = move || {
        let id = line_id_counter.fetch_add(1, Ordering::SeqCst);
        LineId::new(format!("cart_{id}"))
    };

    let (actor, generic_client) = TableActor::new(buffer_size, next_line_id);
    (actor, CartClient::new(generic_client))
}
