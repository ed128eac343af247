use crate::model::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// The client never mutates products; it holds read-only copies joined onto cart lines
/// and favorites.
///
/// # Table
/// Stored in the `products` table, see [`crate::product_table`] for the row rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image_urls: Vec<String>,
    pub stock_quantity: u32,
    pub is_featured: bool,
    pub is_active: bool,
}

impl Product {
    /// Creates an active, non-featured product with no stock, images or sale price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            sale_price: None,
            image_urls: Vec::new(),
            stock_quantity: 0,
            is_featured: false,
            is_active: true,
        }
    }

    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// The price a buyer pays per unit: the sale price when one is set, else the list price.
    pub fn effective_price(&self) -> Decimal {
        self.sale_price.unwrap_or(self.price)
    }

    pub fn is_on_sale(&self) -> bool {
        self.sale_price.is_some()
    }
}

/// Columns for a new catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInsert {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image_urls: Vec<String>,
    pub stock_quantity: u32,
    pub is_featured: bool,
}

impl ProductInsert {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            sale_price: None,
            image_urls: Vec::new(),
            stock_quantity: 0,
            is_featured: false,
        }
    }

    pub fn with_sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_stock(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }
}

/// Partial update of a catalog entry. `sale_price: Some(None)` ends a sale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub price: Option<Decimal>,
    pub sale_price: Option<Option<Decimal>>,
    pub stock_quantity: Option<u32>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// `WHERE` clause for the `products` table.
#[derive(Debug, Clone)]
pub enum ProductFilter {
    All,
    Active,
    Featured,
    Ids(Vec<ProductId>),
}
