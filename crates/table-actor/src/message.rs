//! # Table Requests
//!
//! Messages exchanged between a [`TableClient`](crate::TableClient) and a
//! [`TableActor`](crate::TableActor).

use crate::error::TableError;
use crate::row::Row;
use tokio::sync::oneshot;

/// One-shot channel a table answers on.
pub type Response<T> = oneshot::Sender<Result<T, TableError>>;

/// A request to a table.
///
/// The variants mirror what a hosted relational backend exposes for a single table:
///
/// - **Insert**: `insert(...).select().single()`, returns the stored row, key included.
/// - **Get**: lookup by primary key.
/// - **Select**: every row matching a [`Row::Filter`], in insertion order.
/// - **Update**: apply a [`Row::Patch`] to one row, returning the new state.
/// - **Delete**: remove one row by key.
/// - **DeleteWhere**: remove every row matching a filter, returning the count.
#[derive(Debug)]
pub enum TableRequest<R: Row> {
    Insert {
        params: R::Insert,
        respond_to: Response<R>,
    },
    Get {
        id: R::Id,
        respond_to: Response<Option<R>>,
    },
    Select {
        filter: R::Filter,
        respond_to: Response<Vec<R>>,
    },
    Update {
        id: R::Id,
        patch: R::Patch,
        respond_to: Response<R>,
    },
    Delete {
        id: R::Id,
        respond_to: Response<()>,
    },
    DeleteWhere {
        filter: R::Filter,
        respond_to: Response<usize>,
    },
}
