//! Count and total follow the lines through arbitrary edit sequences.

use proptest::prelude::*;
use rust_decimal::Decimal;
use storefront_cart::lifecycle::{ShopSession, ShopSystem};
use storefront_cart::model::{Product, ProductInsert, UserId};

#[derive(Debug, Clone)]
enum Edit {
    Add { product: usize, quantity: u32 },
    Update { line: usize, quantity: i64 },
    Remove { line: usize },
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..3, 1u32..5).prop_map(|(product, quantity)| Edit::Add { product, quantity }),
        (0usize..4, -1i64..7).prop_map(|(line, quantity)| Edit::Update { line, quantity }),
        (0usize..4).prop_map(|line| Edit::Remove { line }),
    ]
}

fn assert_derived_figures(session: &ShopSession) {
    let store = session.store();
    let total: Decimal = store
        .cart_items()
        .iter()
        .map(|line| line.product.effective_price() * Decimal::from(line.quantity))
        .sum();
    let count: u64 = store.cart_items().iter().map(|line| u64::from(line.quantity)).sum();
    assert_eq!(store.total(), total);
    assert_eq!(store.cart_count(), count);
}

async fn catalog(system: &ShopSystem) -> Vec<Product> {
    let mut products = Vec::new();
    for (name, price, sale) in [("Lamp", 10, None), ("Scarf", 8, Some(Decimal::new(550, 2))), ("Mug", 4, None)] {
        let mut params = ProductInsert::new(name, Decimal::from(price));
        if let Some(sale) = sale {
            params = params.with_sale_price(sale);
        }
        products.push(system.product_client.create_product(params).await.unwrap());
    }
    products
}

async fn run_edits(edits: Vec<Edit>) {
    let system = ShopSystem::new();
    let products = catalog(&system).await;
    let mut session = system.sign_in(UserId::new("user_1")).await;

    for edit in edits {
        let lines: Vec<_> = session.store().cart_items().iter().map(|line| line.id.clone()).collect();
        match edit {
            Edit::Add { product, quantity } => {
                session.add_to_cart(&products[product], quantity).await.unwrap();
            }
            Edit::Update { line, quantity } => {
                if let Some(line_id) = lines.get(line) {
                    session.update_quantity(line_id, quantity).await.unwrap();
                }
            }
            Edit::Remove { line } => {
                if let Some(line_id) = lines.get(line) {
                    session.remove_from_cart(line_id).await.unwrap();
                }
            }
        }
        assert_derived_figures(&session);
    }

    // the backend holds the same cart
    let local_count = session.store().cart_count();
    let local_total = session.store().total();
    session.refresh().await.unwrap();
    assert_eq!(session.store().cart_count(), local_count);
    assert_eq!(session.store().total(), local_total);

    session.sign_out();
    system.shutdown().await.unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn total_matches_lines_after_any_edits(edits in prop::collection::vec(edit(), 1..25)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(run_edits(edits));
    }
}
