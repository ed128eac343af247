use crate::backend::{Backend, TableBackend};
use crate::clients::{CartClient, FavoriteClient, OrderClient, ProductClient};
use crate::config::StoreConfig;
use crate::lifecycle::ShopSession;
use crate::model::UserId;
use crate::store::CartStore;
use std::sync::Arc;
use tracing::{error, info};

/// Runtime orchestrator for the in-process backend.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping every table actor
/// - **Dependency Wiring**: the cart and favorites tables check products through a
///   [`ProductClient`] injected at `run()`
/// - **Store Construction**: handing out [`CartStore`]s bound to a [`TableBackend`]
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new();
/// let mug = system.product_client.create_product(ProductInsert::new("Mug", dec!(12))).await?;
///
/// let mut session = system.sign_in(UserId::new("user_1")).await;
/// session.add_to_cart(&mug, 2).await?;
///
/// // sessions hold table clients: drop them before shutting down
/// session.sign_out();
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub favorite_client: FavoriteClient,
    pub order_client: OrderClient,

    config: StoreConfig,

    /// Task handles for all running tables (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for ShopSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopSystem {
    /// Starts every table with the default configuration. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        // 1. Create tables (no dependencies)
        let (product_actor, product_client) = crate::product_table::new(config.table_buffer);
        let (cart_actor, cart_client) = crate::cart_table::new(config.table_buffer);
        let (favorite_actor, favorite_client) = crate::favorite_table::new(config.table_buffer);
        let (order_actor, order_client) = crate::order_table::new(config.table_buffer);

        // 2. Start tables with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(product_client.clone()));
        let favorite_handle = tokio::spawn(favorite_actor.run(product_client.clone()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(policy = %config.sync_policy, buffer = config.table_buffer, "Shop system started");

        Self {
            product_client,
            cart_client,
            favorite_client,
            order_client,
            config,
            handles: vec![product_handle, cart_handle, favorite_handle, order_handle],
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// A backend over this system's tables.
    pub fn backend(&self) -> Arc<dyn Backend> {
        Arc::new(TableBackend::new(
            self.product_client.clone(),
            self.cart_client.clone(),
            self.favorite_client.clone(),
            self.order_client.clone(),
        ))
    }

    /// A fresh, not yet loaded store configured like the system.
    pub fn store(&self) -> CartStore {
        CartStore::with_config(self.backend(), &self.config)
    }

    /// Start a session for `user_id` on a fresh store.
    pub async fn sign_in(&self, user_id: UserId) -> ShopSession {
        ShopSession::sign_in(self.store(), user_id).await
    }

    /// Gracefully shuts down every table.
    ///
    /// Stores and sessions hold clones of the table clients; a table only stops once
    /// every clone is gone, so drop them first.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all tables shut down cleanly
    /// - `Err(String)` if any table task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Closing the last sender ends each table's request loop. The cart and favorites
        // tables hold product clients, so the products table stops after them.
        drop(self.product_client);
        drop(self.cart_client);
        drop(self.favorite_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(format!("Table task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
