//! # System Lifecycle
//!
//! Starting the tables, binding stores to users, and stopping everything again.
//!
//! - [`ShopSystem`] spawns one task per table and wires the cart and favorites tables to
//!   the products table through context injection (`run(product_client)`), so rows can
//!   check the catalog while validating a write.
//! - [`ShopSession`] owns a [`CartStore`](crate::store::CartStore) for one signed-in user.
//!   There is no global store: a session is created at sign-in and consumed at sign-out.
//! - [`setup_tracing`] installs the log subscriber.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop sessions and stores** - they hold clones of the table clients
//! 2. **Drop the system's clients** - `ShopSystem::shutdown` does this
//! 3. **Tables detect closure** - `receiver.recv()` returns `None`
//! 4. **Await completion** - every table task is joined
//!
//! The dependency graph is acyclic (cart → products, favorites → products), so each
//! table stops when its own channel closes and the products table follows once the two
//! tables holding its client are gone.

pub mod session;
pub mod shop_system;
pub mod tracing;

pub use self::tracing::*;
pub use session::*;
pub use shop_system::*;
