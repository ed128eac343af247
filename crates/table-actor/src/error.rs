//! # Table Errors
//!
//! Errors raised by the table machinery itself, shared by every table and client.

/// Errors that can occur while talking to a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table closed")]
    TableClosed,
    #[error("Table dropped response channel")]
    ResponseDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Unique constraint violated: {0}")]
    Conflict(String),
    #[error("Row rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}
