//! Error types for the products table.

use table_actor::TableError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Prices are never negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// A sale price must undercut the list price.
    #[error("Sale price {sale_price} is not below list price {price}")]
    SaleNotBelowPrice { price: String, sale_price: String },

    #[error("Product name must not be empty")]
    MissingName,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// Recover the row error from a rejected write, or classify the table failure.
    pub fn from_table(e: TableError) -> Self {
        match e {
            TableError::NotFound(id) => Self::NotFound(id),
            TableError::Rejected(source) => match source.downcast::<ProductError>() {
                Ok(row) => *row,
                Err(other) => Self::ActorCommunicationError(other.to_string()),
            },
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}
