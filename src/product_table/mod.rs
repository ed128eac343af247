//! # Product Table
//!
//! The `products` catalog. Products are written by the catalog side (the demo seeds them);
//! the cart and favorites tables only read them to check that a product can be referenced.
//!
//! ## Structure
//!
//! - [`row`] - [`Row`](table_actor::Row) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory returning the actor and a [`ProductClient`]

pub mod error;
pub mod row;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::{Product, ProductId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use table_actor::TableActor;

/// Creates the products table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Product>, ProductClient) {
    let product_id_counter = Arc::new(AtomicU64::new(1));
    let next_product_id = move || {
        let id = product_id_counter.fetch_add(1, Ordering::SeqCst);
        ProductId::new(format!("product_{id}"))
    };

    let (actor, generic_client) = TableActor::new(buffer_size, next_product_id);
    (actor, ProductClient::new(generic_client))
}
