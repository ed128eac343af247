//! Type-safe wrappers around [`TableClient`](table_actor::TableClient), one per table.
//!
//! Each client implements [`TableHandle`](table_actor::TableHandle) for `get` / `select` /
//! `delete` and adds the table's own writes with its own error type.

pub mod cart_client;
pub mod favorite_client;
pub mod order_client;
pub mod product_client;

pub use cart_client::*;
pub use favorite_client::*;
pub use order_client::*;
pub use product_client::*;
