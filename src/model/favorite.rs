use crate::model::{FavoriteId, Product, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// A row of the `favorites` table.
///
/// # Table
/// At most one row per user and product, see [`crate::favorite_table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRow {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// Columns for a new favorite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteInsert {
    pub user_id: UserId,
    pub product_id: ProductId,
}

/// `WHERE` clause for the `favorites` table.
#[derive(Debug, Clone)]
pub enum FavoriteFilter {
    User(UserId),
}

/// A favorite as the client sees it: the row joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub product: Product,
}

impl Favorite {
    pub fn new(id: impl Into<FavoriteId>, product: Product) -> Self {
        Self {
            id: id.into(),
            product,
        }
    }
}
