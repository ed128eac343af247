//! Error types for the orders table.

use table_actor::TableError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Orders cannot be changed once placed")]
    ReadOnly,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// Recover the row error from a rejected write, or classify the table failure.
    pub fn from_table(e: TableError) -> Self {
        match e {
            TableError::NotFound(id) => Self::NotFound(id),
            TableError::Rejected(source) => match source.downcast::<OrderError>() {
                Ok(row) => *row,
                Err(other) => Self::ActorCommunicationError(other.to_string()),
            },
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
