use crate::backend::BackendError;
use crate::model::LineId;
use thiserror::Error;

/// Why a store operation did not complete.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Remote(#[from] BackendError),

    /// The line is not in the local cart. Nothing was sent.
    #[error("Cart line not found: {0}")]
    LineNotFound(LineId),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Shipping address is missing {0}")]
    IncompleteAddress(String),
}
