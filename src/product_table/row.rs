//! [`Row`] implementation for [`Product`].

use crate::model::{Product, ProductFilter, ProductId, ProductInsert, ProductPatch};
use crate::product_table::ProductError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use table_actor::Row;

fn check_prices(price: Decimal, sale_price: Option<Decimal>) -> Result<(), ProductError> {
    if price.is_sign_negative() {
        return Err(ProductError::InvalidPrice(price.to_string()));
    }
    if let Some(sale_price) = sale_price {
        if sale_price.is_sign_negative() {
            return Err(ProductError::InvalidPrice(sale_price.to_string()));
        }
        if sale_price >= price {
            return Err(ProductError::SaleNotBelowPrice {
                price: price.to_string(),
                sale_price: sale_price.to_string(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl Row for Product {
    type Id = ProductId;
    type Insert = ProductInsert;
    type Patch = ProductPatch;
    type Filter = ProductFilter;
    type Context = ();
    type Error = ProductError;

    fn from_insert(id: ProductId, params: ProductInsert) -> Result<Self, ProductError> {
        if params.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }
        check_prices(params.price, params.sale_price)?;

        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            sale_price: params.sale_price,
            image_urls: params.image_urls,
            stock_quantity: params.stock_quantity,
            is_featured: params.is_featured,
            is_active: true,
        })
    }

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::All => true,
            ProductFilter::Active => self.is_active,
            ProductFilter::Featured => self.is_active && self.is_featured,
            ProductFilter::Ids(ids) => ids.contains(&self.id),
        }
    }

    async fn on_update(&mut self, patch: ProductPatch, _ctx: &()) -> Result<(), ProductError> {
        let price = patch.price.unwrap_or(self.price);
        let sale_price = patch.sale_price.unwrap_or(self.sale_price);
        check_prices(price, sale_price)?;

        self.price = price;
        self.sale_price = sale_price;
        if let Some(stock) = patch.stock_quantity {
            self.stock_quantity = stock;
        }
        if let Some(featured) = patch.is_featured {
            self.is_featured = featured;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        Ok(())
    }
}
