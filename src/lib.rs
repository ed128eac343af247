//! # Storefront Cart
//!
//! > **The cart & favorites store of a mobile storefront, with an in-process backend.**
//!
//! The storefront is a set of thin screens over a hosted backend; the one piece of client
//! state with real invariants is the cart. [`store::CartStore`] keeps an in-memory mirror of
//! the signed-in user's cart lines and favorites, derives the badge count and the total,
//! and reconciles local edits with the backend of record.
//!
//! ## Design Notes
//!
//! ### 1. Optimistic Edits, Pessimistic Creation
//! Quantity changes and removals show up locally before the backend confirms them; new
//! cart lines and favorites appear only once the backend returns their ids. What happens
//! to an optimistic edit the backend refuses is a [`SyncPolicy`](store::SyncPolicy).
//!
//! ### 2. One Boundary
//! The store talks to the backend through the [`Backend`](backend::Backend) trait only.
//! [`TableBackend`](backend::TableBackend) implements it over in-process tables built on
//! the `table-actor` crate: one Tokio task per table, typed clients, row-level constraints.
//!
//! ### 3. No Global Store
//! A [`ShopSession`](lifecycle::ShopSession) owns the store for one user, from sign-in to
//! sign-out.
//!
//! ## Module Tour
//!
//! - [`model`] - products, cart lines, favorites, orders, newtype ids
//! - [`product_table`], [`cart_table`], [`favorite_table`], [`order_table`] - the rows and
//!   their backend-side rules
//! - [`clients`] - typed clients for each table
//! - [`backend`] - the store's boundary and its table-backed implementation
//! - [`store`] - the cart & favorites store
//! - [`lifecycle`] - [`ShopSystem`](lifecycle::ShopSystem), sessions, tracing setup
//! - [`config`] - environment configuration
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! CART_SYNC_POLICY=rollback RUST_LOG=debug cargo run
//! ```

pub mod backend;
pub mod cart_table;
pub mod clients;
pub mod config;
pub mod favorite_table;
pub mod lifecycle;
pub mod model;
pub mod order_table;
pub mod product_table;
pub mod store;
