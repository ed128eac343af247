//! # TableHandle Trait
//!
//! Common surface for table-specific clients: implement `inner` and `map_error` and get
//! `get`, `select` and `delete` with the client's own error type.
use crate::{Row, TableClient, TableError};
use async_trait::async_trait;

/// Trait for table-specific clients to inherit the plain read/delete operations.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use table_actor::{Row, TableClient, TableError, TableHandle};
///
/// #[derive(Clone, Debug)]
/// struct Tag { id: u32, label: String }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// #[async_trait]
/// impl Row for Tag {
///     type Id = u32;
///     type Insert = String;
///     type Patch = String;
///     type Filter = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_insert(id: u32, label: String) -> Result<Self, TagError> { Ok(Self { id, label }) }
///     fn id(&self) -> &u32 { &self.id }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, label: String, _: &()) -> Result<(), TagError> {
///         self.label = label;
///         Ok(())
///     }
/// }
///
/// struct TagClient { inner: TableClient<Tag> }
///
/// #[async_trait]
/// impl TableHandle<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &TableClient<Tag> { &self.inner }
///     fn map_error(e: TableError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // get(), select() and delete() come with the trait
///     let _ = client.get(1).await;
///     let _ = client.select(()).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait TableHandle<R: Row>: Send + Sync {
    /// The table-specific error type.
    type Error: Send + Sync;

    /// The generic client this handle wraps.
    fn inner(&self) -> &TableClient<R>;

    /// Map a table error into the handle's error type.
    fn map_error(e: TableError) -> Self::Error;

    /// Fetch a row by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: R::Id) -> Result<Option<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn select(&self, filter: R::Filter) -> Result<Vec<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().select(filter).await.map_err(Self::map_error)
    }

    /// Delete a row by key.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: R::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
