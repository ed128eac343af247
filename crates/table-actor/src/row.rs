//! # Row Trait
//!
//! The `Row` trait is the contract every table record (product, cart line, favorite, order)
//! implements to be served by a [`TableActor`](crate::TableActor). It fixes the associated
//! types for the primary key, the insert and patch payloads, and the filter used by
//! `select` / `delete_where`, and exposes hooks the table runs around each write.
//!
//! Backend-side invariants live here. A table rejects an insert whose `from_insert` or
//! `on_insert` fails, and rejects any insert that [`conflicts_with`](Row::conflicts_with)
//! a row it already holds (unique constraints such as one favorite per user and product).
//!
//! # Provided Methods (Hooks)
//! - [`Row::conflicts_with`]
//! - [`Row::on_insert`]
//! - [`Row::on_delete`]
//!
//! The defaults accept everything.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A record stored in a [`TableActor`](crate::TableActor).
///
/// # Async & Context
/// Hooks are `async` so a row can consult other tables while validating a write.
/// The `Context` is handed to the actor in `run()`, not at construction, so tables
/// that depend on each other can be wired after all of them exist.
#[async_trait]
pub trait Row: Clone + Send + Sync + 'static {
    /// Primary key assigned by the table on insert.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Columns supplied by the caller on insert.
    type Insert: Send + Sync + Debug;

    /// Partial update applied by `update`.
    type Patch: Send + Sync + Debug;

    /// Predicate used by `select` and `delete_where` (the `WHERE` clause).
    type Filter: Send + Sync + Debug;

    /// Dependencies injected into the hooks. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error raised when a row rejects a write.
    ///
    /// One error type per table, not one per operation: callers match a single enum
    /// whatever the failing write was.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the stored row from its freshly assigned key and the insert payload.
    fn from_insert(id: Self::Id, params: Self::Insert) -> Result<Self, Self::Error>;

    /// The primary key of this row.
    fn id(&self) -> &Self::Id;

    /// Whether this row satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Whether inserting `self` would violate a unique constraint held by `existing`.
    fn conflicts_with(&self, _existing: &Self) -> bool {
        false
    }

    /// Called after `from_insert`, before the row is stored.
    async fn on_insert(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a patch in place. Returning an error leaves the stored row untouched.
    async fn on_update(&mut self, patch: Self::Patch, _ctx: &Self::Context) -> Result<(), Self::Error>;

    /// Called before the row is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
