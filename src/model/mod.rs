//! Plain data types: the rows of the backend tables and the joined shapes the store keeps.
//!
//! Row types (`*Row`, plus [`Product`]) implement [`Row`](table_actor::Row) in the
//! matching `*_table` module.

pub mod cart_line;
pub mod favorite;
pub mod ids;
pub mod order;
pub mod product;

pub use cart_line::*;
pub use favorite::*;
pub use ids::*;
pub use order::*;
pub use product::*;
