//! [`Backend`] served by the in-process tables.

use crate::backend::{Backend, BackendError};
use crate::clients::{CartClient, FavoriteClient, OrderClient, ProductClient};
use crate::model::{
    CartItemInsert, CartLine, Favorite, FavoriteId, FavoriteInsert, LineId, OrderInsert, OrderRow,
    Product, ProductId, UserId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use table_actor::TableHandle;
use tracing::{debug, instrument, warn};

/// Backend over the table clients. Joins rows with products the way a
/// `select('*, product:products(*)')` would.
#[derive(Clone)]
pub struct TableBackend {
    products: ProductClient,
    cart: CartClient,
    favorites: FavoriteClient,
    orders: OrderClient,
}

impl TableBackend {
    pub fn new(
        products: ProductClient,
        cart: CartClient,
        favorites: FavoriteClient,
        orders: OrderClient,
    ) -> Self {
        Self {
            products,
            cart,
            favorites,
            orders,
        }
    }

    /// One product select for all ids, keyed for joining.
    async fn product_index(
        &self,
        operation: &'static str,
        ids: impl Iterator<Item = &ProductId>,
    ) -> Result<HashMap<ProductId, Product>, BackendError> {
        let mut wanted: Vec<ProductId> = Vec::new();
        for id in ids {
            if !wanted.contains(id) {
                wanted.push(id.clone());
            }
        }
        let products = self
            .products
            .products_by_ids(wanted)
            .await
            .map_err(|e| BackendError::new(operation, e))?;
        Ok(products.into_iter().map(|p| (p.id.clone(), p)).collect())
    }
}

#[async_trait]
impl Backend for TableBackend {
    #[instrument(skip(self))]
    async fn fetch_cart(&self, user_id: &UserId) -> Result<Vec<CartLine>, BackendError> {
        let rows = self
            .cart
            .lines_for_user(user_id.clone())
            .await
            .map_err(|e| BackendError::new("fetch_cart", e))?;
        let products = self
            .product_index("fetch_cart", rows.iter().map(|row| &row.product_id))
            .await?;

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            match products.get(&row.product_id) {
                Some(product) => lines.push(CartLine::new(row.id, row.quantity, product.clone())),
                None => warn!(line_id = %row.id, product_id = %row.product_id, "Skipping line without product"),
            }
        }
        debug!(lines = lines.len(), "Cart fetched");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn fetch_favorites(&self, user_id: &UserId) -> Result<Vec<Favorite>, BackendError> {
        let rows = self
            .favorites
            .favorites_for_user(user_id.clone())
            .await
            .map_err(|e| BackendError::new("fetch_favorites", e))?;
        let products = self
            .product_index("fetch_favorites", rows.iter().map(|row| &row.product_id))
            .await?;

        let favorites: Vec<Favorite> = rows
            .into_iter()
            .filter_map(|row| match products.get(&row.product_id) {
                Some(product) => Some(Favorite::new(row.id, product.clone())),
                None => {
                    warn!(favorite_id = %row.id, product_id = %row.product_id, "Skipping favorite without product");
                    None
                }
            })
            .collect();
        debug!(favorites = favorites.len(), "Favorites fetched");
        Ok(favorites)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert_cart_line(
        &self,
        user_id: &UserId,
        product: &Product,
        quantity: u32,
    ) -> Result<CartLine, BackendError> {
        let row = self
            .cart
            .add_line(CartItemInsert {
                user_id: user_id.clone(),
                product_id: product.id.clone(),
                quantity,
            })
            .await
            .map_err(|e| BackendError::new("insert_cart_line", e))?;
        Ok(CartLine::new(row.id, row.quantity, product.clone()))
    }

    #[instrument(skip(self))]
    async fn update_cart_quantity(&self, line_id: &LineId, quantity: u32) -> Result<(), BackendError> {
        self.cart
            .set_quantity(line_id.clone(), quantity)
            .await
            .map(|_| ())
            .map_err(|e| BackendError::new("update_cart_quantity", e))
    }

    #[instrument(skip(self))]
    async fn delete_cart_line(&self, line_id: &LineId) -> Result<(), BackendError> {
        self.cart
            .delete(line_id.clone())
            .await
            .map_err(|e| BackendError::new("delete_cart_line", e))
    }

    #[instrument(skip(self, line_ids), fields(count = line_ids.len()))]
    async fn delete_cart_lines(&self, line_ids: &[LineId]) -> Result<(), BackendError> {
        let removed = self
            .cart
            .remove_lines(line_ids.to_vec())
            .await
            .map_err(|e| BackendError::new("delete_cart_lines", e))?;
        if removed != line_ids.len() {
            warn!(removed, requested = line_ids.len(), "Some cart lines were already gone");
        }
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert_favorite(&self, user_id: &UserId, product: &Product) -> Result<Favorite, BackendError> {
        let row = self
            .favorites
            .add_favorite(FavoriteInsert {
                user_id: user_id.clone(),
                product_id: product.id.clone(),
            })
            .await
            .map_err(|e| BackendError::new("insert_favorite", e))?;
        Ok(Favorite::new(row.id, product.clone()))
    }

    #[instrument(skip(self))]
    async fn delete_favorite(&self, favorite_id: &FavoriteId) -> Result<(), BackendError> {
        self.favorites
            .delete(favorite_id.clone())
            .await
            .map_err(|e| BackendError::new("delete_favorite", e))
    }

    #[instrument(skip(self, order), fields(user_id = %order.user_id))]
    async fn insert_order(&self, order: OrderInsert) -> Result<OrderRow, BackendError> {
        self.orders
            .place_order(order)
            .await
            .map_err(|e| BackendError::new("insert_order", e))
    }
}
