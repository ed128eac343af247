//! # Mock Tables
//!
//! [`MockTable<R>`] hands out an ordinary [`TableClient<R>`] whose requests are answered
//! from a queue of scripted responses instead of a running [`TableActor`](crate::TableActor).
//! It is the easy way to make a backend call fail on cue.
//!
//! | | `MockTable` | real `TableActor` |
//! |---|---|---|
//! | State | none, only scripted answers | real rows and constraints |
//! | Error injection | `return_err` | only through row validation |
//! | Use | logic *around* a client | the table itself, end-to-end flows |
//!
//! ```rust
//! use async_trait::async_trait;
//! use table_actor::mock::MockTable;
//! use table_actor::{Row, TableError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Tag { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("tag")] struct TagError;
//!
//! #[async_trait]
//! impl Row for Tag {
//!     type Id = u32; type Insert = (); type Patch = (); type Filter = ();
//!     type Context = (); type Error = TagError;
//!     fn from_insert(id: u32, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn id(&self) -> &u32 { &self.id }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Tag>::new();
//!     mock.expect_select().return_ok(vec![Tag { id: 1 }]);
//!     mock.expect_delete().return_err(TableError::TableClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.select(()).await.unwrap(), vec![Tag { id: 1 }]);
//!     assert!(matches!(client.delete(1).await, Err(TableError::TableClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! Expectations are consumed in the order they were scripted. A request that does not
//! match the next expectation gets no answer (the caller sees
//! [`TableError::ResponseDropped`]) and is reported by [`MockTable::verify`].

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::TableRequest;
use crate::row::Row;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer for the next request.
enum Expectation<R: Row> {
    Insert(Result<R, TableError>),
    Get(Result<Option<R>, TableError>),
    Select(Result<Vec<R>, TableError>),
    Update(Result<R, TableError>),
    Delete(Result<(), TableError>),
    DeleteWhere(Result<usize, TableError>),
}

impl<R: Row> Expectation<R> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Get(_) => "get",
            Self::Select(_) => "select",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::DeleteWhere(_) => "delete_where",
        }
    }
}

fn request_kind<R: Row>(request: &TableRequest<R>) -> &'static str {
    match request {
        TableRequest::Insert { .. } => "insert",
        TableRequest::Get { .. } => "get",
        TableRequest::Select { .. } => "select",
        TableRequest::Update { .. } => "update",
        TableRequest::Delete { .. } => "delete",
        TableRequest::DeleteWhere { .. } => "delete_where",
    }
}

type Queue<R> = Arc<Mutex<VecDeque<Expectation<R>>>>;

/// A table stand-in answering from scripted expectations.
pub struct MockTable<R: Row> {
    client: TableClient<R>,
    expectations: Queue<R>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<R: Row> Default for MockTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Row> MockTable<R> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<R>>(100);
        let expectations: Queue<R> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&queue).pop_front();

                match (request, next) {
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        TableRequest::DeleteWhere { respond_to, .. },
                        Some(Expectation::DeleteWhere(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    (request, expected) => {
                        let expected = expected.as_ref().map_or("nothing", Expectation::kind);
                        lock(&seen).push(format!(
                            "got {} while expecting {expected}",
                            request_kind(&request)
                        ));
                    }
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn client(&self) -> TableClient<R> {
        self.client.clone()
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<R, R> {
        self.builder(Expectation::Insert)
    }

    pub fn expect_get(&mut self) -> ExpectationBuilder<R, Option<R>> {
        self.builder(Expectation::Get)
    }

    pub fn expect_select(&mut self) -> ExpectationBuilder<R, Vec<R>> {
        self.builder(Expectation::Select)
    }

    pub fn expect_update(&mut self) -> ExpectationBuilder<R, R> {
        self.builder(Expectation::Update)
    }

    pub fn expect_delete(&mut self) -> ExpectationBuilder<R, ()> {
        self.builder(Expectation::Delete)
    }

    pub fn expect_delete_where(&mut self) -> ExpectationBuilder<R, usize> {
        self.builder(Expectation::DeleteWhere)
    }

    /// Panics if an expectation is left over or a request arrived out of script.
    pub fn verify(&self) {
        let mismatches = lock(&self.mismatches);
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<T>(&self, wrap: fn(Result<T, TableError>) -> Expectation<R>) -> ExpectationBuilder<R, T> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap,
        }
    }
}

/// Completes an `expect_*` call with the scripted answer.
pub struct ExpectationBuilder<R: Row, T> {
    expectations: Queue<R>,
    wrap: fn(Result<T, TableError>) -> Expectation<R>,
}

impl<R: Row, T> ExpectationBuilder<R, T> {
    /// Answer the request successfully.
    pub fn return_ok(self, value: T) {
        lock(&self.expectations).push_back((self.wrap)(Ok(value)));
    }

    /// Fail the request.
    pub fn return_err(self, error: TableError) {
        lock(&self.expectations).push_back((self.wrap)(Err(error)));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client together with the raw receiver its requests land on.
///
/// Use this when the test needs to inspect the payload of a request before answering
/// it; for scripted answers prefer [`MockTable`].
pub fn create_mock_table<R: Row>(buffer_size: usize) -> (TableClient<R>, mpsc::Receiver<TableRequest<R>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

/// Next request, if it is an insert.
pub async fn expect_insert<R: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<R>>,
) -> Option<(R::Insert, oneshot::Sender<Result<R, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an update.
pub async fn expect_update<R: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<R>>,
) -> Option<(R::Id, R::Patch, oneshot::Sender<Result<R, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a filtered delete.
pub async fn expect_delete_where<R: Row>(
    receiver: &mut mpsc::Receiver<TableRequest<R>>,
) -> Option<(R::Filter, oneshot::Sender<Result<usize, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::DeleteWhere { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}
