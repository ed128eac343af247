//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); the structured fields
//! (`table`, `line_id`, `product_id`, `size`) say where a line comes from.
//!
//! ```bash
//! RUST_LOG=info cargo run    # table writes and store transitions
//! RUST_LOG=debug cargo run   # plus request payloads and notices
//! ```
//!
//! With `RUST_LOG=info`, adding a product to the cart reads:
//!
//! ```text
//! INFO add_to_cart:insert_cart_line: Inserted table="CartItemRow" id=cart_1 size=1
//! INFO add_to_cart: Line added line_id=cart_1 quantity=2
//! ```
//!
//! Remote failures show up once at `WARN` in the table and once in the store.

/// Initialise the global subscriber. Call once, from the binary.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
