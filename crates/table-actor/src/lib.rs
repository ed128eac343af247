//! # Table Actor
//!
//! In-process relational tables built on the actor model: each table is one Tokio task that
//! owns its rows and answers typed requests sent through a cloneable client. The crate is the
//! stand-in for a hosted backend's table API (insert / select-where / update / delete-where)
//! when the real service is not around: demos, integration tests, local development.
//!
//! ## Layers
//!
//! 1. **Row layer** ([`Row`]) - what a record looks like, how it is filtered, which writes it
//!    accepts. Backend-side constraints (positive quantities, unique pairs) live here.
//! 2. **Runtime layer** ([`TableActor`]) - request loop, key assignment, ordering.
//! 3. **Interface layer** ([`TableClient`], [`TableHandle`]) - typed async calls.
//!
//! ## Concurrency Model
//!
//! - Each table runs in its own task and processes requests **sequentially**, so two writes to
//!   the same table never interleave and the row map needs no lock.
//! - Separate tables run in parallel.
//! - A table stops when the last client is dropped.
//!
//! ## Context Injection
//!
//! Dependencies reach the row hooks through `run(context)` rather than the constructor, so a
//! table whose rows consult another table can be wired after both exist.
//!
//! ## Testing
//!
//! [`mock::MockTable`] returns a real [`TableClient`] answered from scripted results, which is
//! how remote failures are injected deterministically.
//!
//! Further reading: [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/).

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod row;

pub use actor::TableActor;
pub use client::TableClient;
pub use client_trait::TableHandle;
pub use error::TableError;
pub use message::{Response, TableRequest};
pub use row::Row;
