//! # Favorites Table
//!
//! The `favorites` table. A row only links a user to a product: there is nothing to
//! update, and the pair (user, product) is unique.

pub mod error;
pub mod row;

pub use error::*;

use crate::clients::FavoriteClient;
use crate::model::{FavoriteId, FavoriteRow};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use table_actor::TableActor;

/// Creates the favorites table and its client. Run it with a [`ProductClient`](crate::clients::ProductClient).
pub fn new(buffer_size: usize) -> (TableActor<FavoriteRow>, FavoriteClient) {
    let favorite_id_counter = Arc::new(AtomicU64::new(1));
    let next_favorite_id = move || {
        let id = favorite_id_counter.fetch_add(1, Ordering::SeqCst);
        FavoriteId::new(format!("favorite_{id}"))
    };

    let (actor, generic_client) = TableActor::new(buffer_size, next_favorite_id);
    (actor, FavoriteClient::new(generic_client))
}
