use crate::model::OrderId;
use std::fmt::Display;

/// A transient user-facing message, shown once and then forgotten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    AddedToCart { product: String },
    AddToCartFailed,
    QuantityUpdateFailed,
    RemovedFromCart,
    RemoveFromCartFailed,
    FavoriteUpdateFailed,
    OrderPlaced { order_id: OrderId },
    CheckoutFailed,
    CartEmpty,
    ShippingIncomplete,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::AddedToCart { .. } => "Added",
            Self::RemovedFromCart => "Removed",
            Self::OrderPlaced { .. } => "Order placed",
            _ => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::AddedToCart { product } => format!("{product} was added to your cart"),
            Self::AddToCartFailed => "Could not add the product to your cart".to_string(),
            Self::QuantityUpdateFailed => "Could not update the quantity".to_string(),
            Self::RemovedFromCart => "The product was removed from your cart".to_string(),
            Self::RemoveFromCartFailed => "Could not remove the product".to_string(),
            Self::FavoriteUpdateFailed => "Could not update your favorites".to_string(),
            Self::OrderPlaced { order_id } => format!("Thank you! Order {order_id} was received"),
            Self::CheckoutFailed => "Could not place the order".to_string(),
            Self::CartEmpty => "Your cart is empty. Add products to start shopping".to_string(),
            Self::ShippingIncomplete => "Please fill in every shipping field".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title() == "Error"
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
