//! # Table Actor
//!
//! The `TableActor` is the server half of a table: it owns the rows and the receiving end
//! of the request channel and answers requests one at a time. Each table runs in its own
//! Tokio task, so the row map needs no lock.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::TableRequest;
use crate::row::Row;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A stored row plus its insertion sequence, which fixes `select` ordering.
struct Slot<R> {
    seq: u64,
    row: R,
}

/// Generic in-memory table served by a single task.
///
/// ## Usage Pattern
///
/// 1.  **Create**: `TableActor::new()` returns the actor and a [`TableClient`].
/// 2.  **Wire**: pass the row's `Context` to `run()`.
/// 3.  **Run**: spawn `run()` on the runtime; it returns once every client is dropped.
///
/// ```rust
/// use async_trait::async_trait;
/// use table_actor::{Row, TableActor};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, owner: String, body: String }
/// #[derive(Debug)] struct NoteInsert { owner: String, body: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Row for Note {
///     type Id = u32;
///     type Insert = NoteInsert;
///     type Patch = String;
///     type Filter = String;
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_insert(id: u32, params: NoteInsert) -> Result<Self, NoteError> {
///         Ok(Self { id, owner: params.owner, body: params.body })
///     }
///     fn id(&self) -> &u32 { &self.id }
///     fn matches(&self, owner: &String) -> bool { &self.owner == owner }
///     async fn on_update(&mut self, body: String, _: &()) -> Result<(), NoteError> {
///         self.body = body;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut next = 0;
///     let (actor, client) = TableActor::<Note>::new(10, move || { next += 1; next });
///     tokio::spawn(actor.run(()));
///
///     let note = client.insert(NoteInsert { owner: "ada".into(), body: "hi".into() }).await.unwrap();
///     let mine = client.select("ada".into()).await.unwrap();
///     assert_eq!(mine.len(), 1);
///     assert_eq!(mine[0].id, note.id);
/// }
/// ```
///
/// ## Operations
///
/// * **Insert**: assign a key, build the row, run `on_insert`, check unique constraints
///   against every stored row, store it, return it.
/// * **Get**: clone of the row, or `None`.
/// * **Select**: clones of every matching row in insertion order.
/// * **Update**: apply the patch to a copy; the stored row is replaced only if the hook
///   succeeds.
/// * **Delete**: run `on_delete`, then remove.
/// * **DeleteWhere**: run `on_delete` on every match first; if any refuses, nothing is
///   removed.
pub struct TableActor<R: Row> {
    receiver: mpsc::Receiver<TableRequest<R>>,
    rows: HashMap<R::Id, Slot<R>>,
    next_seq: u64,
    next_id: Box<dyn FnMut() -> R::Id + Send>,
}

impl<R: Row> TableActor<R> {
    /// Creates a table and the client used to reach it.
    ///
    /// * `buffer_size` - capacity of the request channel; senders wait when it is full.
    /// * `next_id` - key generator, called once per accepted insert attempt.
    pub fn new(
        buffer_size: usize,
        next_id: impl FnMut() -> R::Id + Send + 'static,
    ) -> (Self, TableClient<R>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            next_seq: 0,
            next_id: Box::new(next_id),
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the request loop until the channel closes.
    ///
    /// `context` is passed to every row hook.
    pub async fn run(mut self, context: R::Context) {
        // "CartItemRow" rather than "storefront_cart::model::cart_line::CartItemRow"
        let table = std::any::type_name::<R>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(table, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Insert { params, respond_to } => {
                    debug!(table, ?params, "Insert");
                    let result = self.insert(params, &context).await;
                    match &result {
                        Ok(row) => info!(table, id = %row.id(), size = self.rows.len(), "Inserted"),
                        Err(e) => warn!(table, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).map(|slot| slot.row.clone());
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Select { filter, respond_to } => {
                    let rows = self.select(&filter);
                    debug!(table, ?filter, matched = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    debug!(table, %id, ?patch, "Update");
                    let result = self.update(&id, patch, &context).await;
                    match &result {
                        Ok(_) => info!(table, %id, "Updated"),
                        Err(e) => warn!(table, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(table, %id, size = self.rows.len(), "Deleted"),
                        Err(e) => warn!(table, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::DeleteWhere { filter, respond_to } => {
                    debug!(table, ?filter, "DeleteWhere");
                    let result = self.delete_where(&filter, &context).await;
                    match &result {
                        Ok(count) => info!(table, count, size = self.rows.len(), "Deleted matching"),
                        Err(e) => warn!(table, error = %e, "DeleteWhere failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }

    async fn insert(&mut self, params: R::Insert, ctx: &R::Context) -> Result<R, TableError> {
        let id = (self.next_id)();
        let mut row = R::from_insert(id.clone(), params).map_err(|e| TableError::Rejected(Box::new(e)))?;
        row.on_insert(ctx)
            .await
            .map_err(|e| TableError::Rejected(Box::new(e)))?;

        if let Some(existing) = self.rows.values().find(|slot| row.conflicts_with(&slot.row)) {
            return Err(TableError::Conflict(format!(
                "{id} duplicates {}",
                existing.row.id()
            )));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(id, Slot { seq, row: row.clone() });
        Ok(row)
    }

    fn select(&self, filter: &R::Filter) -> Vec<R> {
        let mut matched: Vec<&Slot<R>> = self
            .rows
            .values()
            .filter(|slot| slot.row.matches(filter))
            .collect();
        matched.sort_by_key(|slot| slot.seq);
        matched.into_iter().map(|slot| slot.row.clone()).collect()
    }

    async fn update(&mut self, id: &R::Id, patch: R::Patch, ctx: &R::Context) -> Result<R, TableError> {
        let slot = self
            .rows
            .get_mut(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        let mut updated = slot.row.clone();
        updated
            .on_update(patch, ctx)
            .await
            .map_err(|e| TableError::Rejected(Box::new(e)))?;
        slot.row = updated.clone();
        Ok(updated)
    }

    async fn delete(&mut self, id: &R::Id, ctx: &R::Context) -> Result<(), TableError> {
        let slot = self
            .rows
            .get(id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        slot.row
            .on_delete(ctx)
            .await
            .map_err(|e| TableError::Rejected(Box::new(e)))?;
        self.rows.remove(id);
        Ok(())
    }

    async fn delete_where(&mut self, filter: &R::Filter, ctx: &R::Context) -> Result<usize, TableError> {
        let doomed: Vec<R> = self
            .rows
            .values()
            .filter(|slot| slot.row.matches(filter))
            .map(|slot| slot.row.clone())
            .collect();
        for row in &doomed {
            row.on_delete(ctx)
                .await
                .map_err(|e| TableError::Rejected(Box::new(e)))?;
        }
        for row in &doomed {
            self.rows.remove(row.id());
        }
        Ok(doomed.len())
    }
}
