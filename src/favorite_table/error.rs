//! Error types for the favorites table.

use table_actor::TableError;
use thiserror::Error;

/// Errors that can occur during favorite operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FavoriteError {
    #[error("Favorite not found: {0}")]
    NotFound(String),

    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// The user already favorited this product.
    #[error("Already a favorite: {0}")]
    Duplicate(String),

    #[error("Favorites cannot be updated")]
    ReadOnly,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl FavoriteError {
    /// Recover the row error from a rejected write, or classify the table failure.
    pub fn from_table(e: TableError) -> Self {
        match e {
            TableError::NotFound(id) => Self::NotFound(id),
            TableError::Conflict(msg) => Self::Duplicate(msg),
            TableError::Rejected(source) => match source.downcast::<FavoriteError>() {
                Ok(row) => *row,
                Err(other) => Self::ActorCommunicationError(other.to_string()),
            },
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<String> for FavoriteError {
    fn from(msg: String) -> Self {
        FavoriteError::ActorCommunicationError(msg)
    }
}
