//! # Observability
//!
//! Structured logging for every collection and the code built on top of it.
//!
//! Collection actors log with a `collection` field instead of the module path
//! (`Created collection="Order" id=order_3 size=3`), so the subscriber hides
//! targets and uses the compact formatter, which prints spans inline
//! (`confirm_payment:find_by_id: Sending request`).
//!
//! ```bash
//! RUST_LOG=info cargo run              # state changes only
//! RUST_LOG=debug cargo run             # request payloads and filters
//! RUST_LOG=tour_booking=debug cargo run
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Call once, at the start of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
