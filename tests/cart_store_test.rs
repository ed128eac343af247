//! Store behaviour when the backend fails, with every table replaced by a `MockTable`.

use rust_decimal::Decimal;
use std::sync::Arc;
use storefront_cart::backend::TableBackend;
use storefront_cart::clients::{CartClient, FavoriteClient, OrderClient, ProductClient};
use storefront_cart::model::{
    CartItemRow, FavoriteId, FavoriteRow, LineId, OrderRow, Product, ShippingAddress, UserId,
};
use storefront_cart::store::{CartStore, Notice, StoreError, SyncPolicy};
use table_actor::mock::MockTable;
use table_actor::TableError;

struct Tables {
    products: MockTable<Product>,
    cart: MockTable<CartItemRow>,
    favorites: MockTable<FavoriteRow>,
    orders: MockTable<OrderRow>,
}

impl Tables {
    fn new() -> Self {
        Self {
            products: MockTable::new(),
            cart: MockTable::new(),
            favorites: MockTable::new(),
            orders: MockTable::new(),
        }
    }

    fn store(&self, policy: SyncPolicy) -> CartStore {
        let backend = TableBackend::new(
            ProductClient::new(self.products.client()),
            CartClient::new(self.cart.client()),
            FavoriteClient::new(self.favorites.client()),
            OrderClient::new(self.orders.client()),
        );
        CartStore::new(Arc::new(backend), policy)
    }

    /// Script one successful load of `lines` and `favorites`.
    ///
    /// Both fetches may hit the products table in either order, so every product select
    /// answers with the whole catalog.
    fn script_load(&mut self, lines: Vec<CartItemRow>, favorites: Vec<FavoriteRow>, catalog: Vec<Product>) {
        let product_selects = usize::from(!lines.is_empty()) + usize::from(!favorites.is_empty());
        self.cart.expect_select().return_ok(lines);
        self.favorites.expect_select().return_ok(favorites);
        for _ in 0..product_selects {
            self.products.expect_select().return_ok(catalog.clone());
        }
    }

    fn verify(&self) {
        self.products.verify();
        self.cart.verify();
        self.favorites.verify();
        self.orders.verify();
    }
}

fn user() -> UserId {
    UserId::new("user_1")
}

fn product_a() -> Product {
    Product::new("product_a", "A", Decimal::from(10))
}

fn product_b() -> Product {
    Product::new("product_b", "B", Decimal::from(4))
}

fn row(id: &str, product: &Product, quantity: u32) -> CartItemRow {
    CartItemRow {
        id: LineId::new(id),
        user_id: user(),
        product_id: product.id.clone(),
        quantity,
    }
}

fn favorite(id: &str, product: &Product) -> FavoriteRow {
    FavoriteRow {
        id: FavoriteId::new(id),
        user_id: user(),
        product_id: product.id.clone(),
    }
}

fn remote_failure() -> TableError {
    TableError::TableClosed
}

/// Cart {A, price 10, qty 2}, loaded.
async fn loaded_store(tables: &mut Tables, policy: SyncPolicy) -> CartStore {
    tables.script_load(vec![row("cart_1", &product_a(), 2)], vec![], vec![product_a()]);
    let mut store = tables.store(policy);
    store.load_initial_data(&user()).await.unwrap();
    assert_eq!(store.total(), Decimal::from(20));
    store
}

#[tokio::test]
async fn test_failed_update_diverges_until_reload() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Observed).await;
    let mut notices = store.subscribe();

    tables.cart.expect_update().return_err(remote_failure());
    let result = store.update_quantity(&LineId::new("cart_1"), 3).await;
    assert!(matches!(result, Err(StoreError::Remote(_))));

    // local state keeps the edit the backend refused
    assert_eq!(store.cart_items()[0].quantity, 3);
    assert_eq!(store.total(), Decimal::from(30));
    assert_eq!(notices.try_recv().unwrap(), Notice::QuantityUpdateFailed);

    // only a reload brings back the backend's view
    tables.script_load(vec![row("cart_1", &product_a(), 2)], vec![], vec![product_a()]);
    store.load_initial_data(&user()).await.unwrap();
    assert_eq!(store.cart_items()[0].quantity, 2);
    assert_eq!(store.total(), Decimal::from(20));

    tables.verify();
}

#[tokio::test]
async fn test_failed_update_rolls_back() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Rollback).await;

    tables.cart.expect_update().return_err(remote_failure());
    let result = store.update_quantity(&LineId::new("cart_1"), 3).await;
    assert!(result.is_err());

    assert_eq!(store.cart_items()[0].quantity, 2);
    assert_eq!(store.total(), Decimal::from(20));
    assert_eq!(store.cart_count(), 2);
    tables.verify();
}

#[tokio::test]
async fn test_failed_remove_follows_policy() {
    for policy in [SyncPolicy::Observed, SyncPolicy::Rollback] {
        let mut tables = Tables::new();
        tables.script_load(
            vec![row("cart_1", &product_a(), 1), row("cart_2", &product_b(), 2)],
            vec![],
            vec![product_a(), product_b()],
        );
        let mut store = tables.store(policy);
        store.load_initial_data(&user()).await.unwrap();
        let mut notices = store.subscribe();

        tables.cart.expect_delete().return_err(remote_failure());
        let result = store.remove_from_cart(&LineId::new("cart_1")).await;
        assert!(matches!(result, Err(StoreError::Remote(_))));
        assert_eq!(notices.try_recv().unwrap(), Notice::RemoveFromCartFailed);

        let ids: Vec<&str> = store.cart_items().iter().map(|line| line.id.as_str()).collect();
        match policy {
            SyncPolicy::Observed => {
                assert_eq!(ids, vec!["cart_2"]);
                assert_eq!(store.total(), Decimal::from(8));
            }
            SyncPolicy::Rollback => {
                assert_eq!(ids, vec!["cart_1", "cart_2"]);
                assert_eq!(store.total(), Decimal::from(18));
            }
        }
        tables.verify();
    }
}

#[tokio::test]
async fn test_failed_insert_leaves_cart_unchanged() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Observed).await;
    let mut notices = store.subscribe();

    tables.cart.expect_insert().return_err(TableError::Conflict("cart_2 duplicates cart_9".into()));
    let result = store.add_to_cart(&product_b(), 1, &user()).await;
    assert!(matches!(result, Err(StoreError::Remote(e)) if e.operation == "insert_cart_line"));

    assert_eq!(store.cart_items().len(), 1);
    assert_eq!(store.total(), Decimal::from(20));
    assert_eq!(notices.try_recv().unwrap(), Notice::AddToCartFailed);
    tables.verify();
}

#[tokio::test]
async fn test_add_to_existing_line_reports_update_failure_as_add_failure() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Rollback).await;
    let mut notices = store.subscribe();

    tables.cart.expect_update().return_err(remote_failure());
    let result = store.add_to_cart(&product_a(), 1, &user()).await;
    assert!(result.is_err());

    assert_eq!(store.cart_items()[0].quantity, 2);
    assert_eq!(notices.try_recv().unwrap(), Notice::AddToCartFailed);
    assert!(notices.try_recv().is_err());
    tables.verify();
}

#[tokio::test]
async fn test_load_failure_ends_empty_and_loaded() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Observed).await;

    tables.cart.expect_select().return_err(remote_failure());
    tables.favorites.expect_select().return_ok(vec![]);
    let result = store.load_initial_data(&user()).await;

    assert!(matches!(result, Err(StoreError::Remote(e)) if e.operation == "fetch_cart"));
    assert!(!store.is_cart_loading());
    assert!(!store.is_favorites_loading());
    assert!(store.cart_items().is_empty());
    assert_eq!(store.total(), Decimal::ZERO);

    // exactly one attempt: a retry would show up as an unscripted request
    tables.verify();
}

#[tokio::test]
async fn test_failed_favorite_removal_follows_policy() {
    for (policy, kept) in [(SyncPolicy::Observed, false), (SyncPolicy::Rollback, true)] {
        let mut tables = Tables::new();
        tables.script_load(vec![], vec![favorite("favorite_1", &product_a())], vec![product_a()]);
        let mut store = tables.store(policy);
        store.load_initial_data(&user()).await.unwrap();
        assert!(store.is_favorite(&product_a().id));

        tables.favorites.expect_delete().return_err(remote_failure());
        let result = store.toggle_favorite(&product_a(), &user()).await;
        assert!(result.is_err());
        assert_eq!(store.is_favorite(&product_a().id), kept);
        tables.verify();
    }
}

#[tokio::test]
async fn test_failed_favorite_insert_adds_nothing() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Observed).await;
    let mut notices = store.subscribe();

    tables.favorites.expect_insert().return_err(remote_failure());
    assert!(store.toggle_favorite(&product_a(), &user()).await.is_err());
    assert!(store.favorites().is_empty());
    assert_eq!(notices.try_recv().unwrap(), Notice::FavoriteUpdateFailed);
    tables.verify();
}

#[tokio::test]
async fn test_failed_order_keeps_cart() {
    let mut tables = Tables::new();
    let mut store = loaded_store(&mut tables, SyncPolicy::Observed).await;
    let mut notices = store.subscribe();

    tables.orders.expect_insert().return_err(remote_failure());
    let address = ShippingAddress::new("Ada", "555-0101", "12 Loom Street", "London");
    let result = store.checkout(&user(), &address).await;

    assert!(matches!(result, Err(StoreError::Remote(e)) if e.operation == "insert_order"));
    assert_eq!(store.cart_items().len(), 1);
    assert_eq!(notices.try_recv().unwrap(), Notice::CheckoutFailed);
    tables.verify();
}
