//! # Backend Boundary
//!
//! Everything the cart store needs from the backend of record: scoped selects, inserts,
//! updates and deletes against `cart_items` and `favorites`, and order placement.
//! Selects come back joined with their product rows.
//!
//! [`TableBackend`] serves these calls from the in-process tables. A hosted service would
//! be another implementation of [`Backend`]; the store does not care which one it gets.

pub mod tables;

pub use tables::*;

use crate::model::{CartLine, Favorite, FavoriteId, LineId, OrderInsert, OrderRow, Product, UserId};
use async_trait::async_trait;
use std::fmt::Display;
use thiserror::Error;

/// Any failed backend call. The store treats every remote failure alike.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{operation} failed: {reason}")]
pub struct BackendError {
    /// The backend call that failed, e.g. `update_cart_quantity`.
    pub operation: &'static str,
    pub reason: String,
}

impl BackendError {
    pub fn new(operation: &'static str, reason: impl Display) -> Self {
        Self {
            operation,
            reason: reason.to_string(),
        }
    }
}

/// Remote operations used by [`CartStore`](crate::store::CartStore).
#[async_trait]
pub trait Backend: Send + Sync {
    /// Every cart line of `user_id`, joined with its product.
    async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartLine>, BackendError>;

    /// Every favorite of `user_id`, joined with its product.
    async fn fetch_favorites(&self, user_id: &UserId) -> Result<Vec<Favorite>, BackendError>;

    /// Create a cart line and return it joined with `product`.
    async fn insert_cart_line(
        &self,
        user_id: &UserId,
        product: &Product,
        quantity: u32,
    ) -> Result<CartLine, BackendError>;

    async fn update_cart_quantity(&self, line_id: &LineId, quantity: u32) -> Result<(), BackendError>;

    async fn delete_cart_line(&self, line_id: &LineId) -> Result<(), BackendError>;

    /// Delete several lines in one call (`delete ... where id in (...)`).
    async fn delete_cart_lines(&self, line_ids: &[LineId]) -> Result<(), BackendError>;

    async fn insert_favorite(&self, user_id: &UserId, product: &Product) -> Result<Favorite, BackendError>;

    async fn delete_favorite(&self, favorite_id: &FavoriteId) -> Result<(), BackendError>;

    async fn insert_order(&self, order: OrderInsert) -> Result<OrderRow, BackendError>;
}
