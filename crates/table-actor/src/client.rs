//! # Table Client
//!
//! The typed, cloneable handle used to send requests to a [`TableActor`](crate::TableActor).

use crate::error::TableError;
use crate::message::TableRequest;
use crate::row::Row;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a table.
///
/// Holds only the request sender, so cloning is cheap. Every method sends one request and
/// awaits its one-shot answer.
pub struct TableClient<R: Row> {
    sender: mpsc::Sender<TableRequest<R>>,
}

impl<R: Row> Clone for TableClient<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R: Row> TableClient<R> {
    pub fn new(sender: mpsc::Sender<TableRequest<R>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, params: R::Insert) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::Insert { params, respond_to }).await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    pub async fn get(&self, id: R::Id) -> Result<Option<R>, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::Get { id, respond_to }).await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    pub async fn select(&self, filter: R::Filter) -> Result<Vec<R>, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::Select { filter, respond_to }).await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    pub async fn update(&self, id: R::Id, patch: R::Patch) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    pub async fn delete(&self, id: R::Id) -> Result<(), TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::Delete { id, respond_to }).await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    pub async fn delete_where(&self, filter: R::Filter) -> Result<usize, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.send(TableRequest::DeleteWhere { filter, respond_to })
            .await?;
        response.await.map_err(|_| TableError::ResponseDropped)?
    }

    async fn send(&self, request: TableRequest<R>) -> Result<(), TableError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| TableError::TableClosed)
    }
}
