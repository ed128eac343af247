use crate::model::{LineId, Product, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A row of the `cart_items` table.
///
/// # Table
/// See [`crate::cart_table`] for the row rules (quantity at least one, one line per
/// user and product).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRow {
    pub id: LineId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Columns for a new cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInsert {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// The only mutable column of a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemPatch {
    pub quantity: u32,
}

/// `WHERE` clause for the `cart_items` table.
#[derive(Debug, Clone)]
pub enum CartItemFilter {
    User(UserId),
    Ids(Vec<LineId>),
}

/// A cart line as the client sees it: the row joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub quantity: u32,
    pub product: Product,
}

impl CartLine {
    pub fn new(id: impl Into<LineId>, quantity: u32, product: Product) -> Self {
        Self {
            id: id.into(),
            quantity,
            product,
        }
    }

    /// Quantity times the product's effective price.
    pub fn line_total(&self) -> Decimal {
        self.product.effective_price() * Decimal::from(self.quantity)
    }
}

/// Derived cart figures. Never stored; recomputed from the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSnapshot {
    /// Distinct lines.
    pub lines: usize,
    /// Sum of quantities, shown on the cart badge.
    pub item_count: u64,
    pub total: Decimal,
}

impl CartSnapshot {
    pub fn of(lines: &[CartLine]) -> Self {
        Self {
            lines: lines.len(),
            item_count: lines.iter().map(|line| u64::from(line.quantity)).sum(),
            total: lines.iter().map(CartLine::line_total).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_effective_price() {
        let lines = vec![
            CartLine::new("l1", 2, Product::new("a", "Mug", Decimal::from(10))),
            CartLine::new(
                "l2",
                3,
                Product::new("b", "Cap", Decimal::from(8)).with_sale_price(Decimal::new(550, 2)),
            ),
        ];

        let snapshot = CartSnapshot::of(&lines);
        assert_eq!(snapshot.lines, 2);
        assert_eq!(snapshot.item_count, 5);
        assert_eq!(snapshot.total, Decimal::new(3650, 2));
    }

    #[test]
    fn test_item_count_holds_quantities_past_u32() {
        let lines = vec![
            CartLine::new("l1", u32::MAX, Product::new("a", "Mug", Decimal::ONE)),
            CartLine::new("l2", 3_000_000_000, Product::new("b", "Cap", Decimal::ONE)),
        ];

        let snapshot = CartSnapshot::of(&lines);
        assert_eq!(snapshot.item_count, u64::from(u32::MAX) + 3_000_000_000);
        assert_eq!(snapshot.total, Decimal::from(u64::from(u32::MAX) + 3_000_000_000));
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        assert_eq!(CartSnapshot::of(&[]), CartSnapshot::default());
    }
}
