//! # Storefront Cart Demo
//!
//! Walks one shopper through the store against the in-process tables:
//! 1.  Seeding a small catalog through the [`ShopSystem`].
//! 2.  Signing in, filling the cart, favoriting a product.
//! 3.  Checking out, signing out, shutting down.

use rust_decimal::Decimal;
use storefront_cart::config::StoreConfig;
use storefront_cart::lifecycle::{setup_tracing, ShopSystem};
use storefront_cart::model::{ProductInsert, ShippingAddress, UserId};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    info!(policy = %config.sync_policy, "Starting storefront demo");

    let system = ShopSystem::with_config(config);

    let span = tracing::info_span!("catalog_seeding");
    let (scarf, mug) = async {
        let scarf = system
            .product_client
            .create_product(
                ProductInsert::new("Wool Scarf", Decimal::new(2500, 2))
                    .with_sale_price(Decimal::new(1999, 2))
                    .with_stock(12)
                    .featured(),
            )
            .await
            .map_err(|e| e.to_string())?;
        let mug = system
            .product_client
            .create_product(ProductInsert::new("Stoneware Mug", Decimal::new(1200, 2)).with_stock(40))
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((scarf, mug))
    }
    .instrument(span)
    .await?;

    info!(scarf = %scarf.id, mug = %mug.id, "Catalog seeded");

    let mut session = system.sign_in(UserId::new("user_1")).await;
    let mut notices = session.store().subscribe();

    let span = tracing::info_span!("shopping");
    async {
        session.add_to_cart(&scarf, 1).await?;
        session.add_to_cart(&mug, 2).await?;
        // same product again: the existing line grows
        session.add_to_cart(&mug, 1).await?;
        session.toggle_favorite(&scarf).await?;

        if let Some(line) = session.store().line_for_product(&mug.id).cloned() {
            session.update_quantity(&line.id, 2).await?;
        }
        Ok::<_, storefront_cart::store::StoreError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let snapshot = session.store().snapshot();
    info!(
        lines = snapshot.lines,
        items = snapshot.item_count,
        total = %snapshot.total,
        favorites = session.store().favorites().len(),
        "Cart ready"
    );

    let address = ShippingAddress::new("Ada Lovelace", "555-0101", "12 Loom Street", "London");
    let span = tracing::info_span!("checkout");
    match session.checkout(&address).instrument(span).await {
        Ok(order) => info!(order_id = %order.id, total = %order.total_amount, status = %order.status, "Order placed"),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    while let Ok(notice) = notices.try_recv() {
        info!(error = notice.is_error(), "{notice}");
    }

    let store = session.sign_out();
    drop(store);

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
