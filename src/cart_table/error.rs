//! Error types for the cart table.

use table_actor::TableError;
use thiserror::Error;

/// Errors that can occur during cart line operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart line not found: {0}")]
    NotFound(String),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    /// The product does not exist or is no longer sold.
    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),

    /// The user already has a line for this product.
    #[error("Duplicate cart line: {0}")]
    Duplicate(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// Recover the row error from a rejected write, or classify the table failure.
    pub fn from_table(e: TableError) -> Self {
        match e {
            TableError::NotFound(id) => Self::NotFound(id),
            TableError::Conflict(msg) => Self::Duplicate(msg),
            TableError::Rejected(source) => match source.downcast::<CartError>() {
                Ok(row) => *row,
                Err(other) => Self::ActorCommunicationError(other.to_string()),
            },
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
