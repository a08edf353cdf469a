//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops the booking back office. Individual actors are
//! simple; wiring them together is where the ordering matters.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them when they start:
//!
//! ```rust,ignore
//! let (tour_actor, tour_client) = tour_actor::new(32);
//! let (order_actor, order_client) = order_actor::new(32);
//!
//! tokio::spawn(tour_actor.run(()));
//! tokio::spawn(order_actor.run(tour_client.clone()));
//! ```
//!
//! `Order` declares `type Context = TourClient` so its `on_create` hook can
//! check the catalog. The other collections need nothing (`Context = ()`).
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop the sweeper** - flip the `watch` channel and wait for the task
//! 2. **Drop all clients** - closes the sender side of every mailbox
//! 3. **Actors detect closure** - `receiver.recv()` returns `None`
//! 4. **Await completion** - wait for every actor task
//!
//! The Order actor holds a `TourClient` clone, so the Tour actor stops only
//! after the Order actor has. The graph is acyclic, so this always finishes.
//!
//! ## Observability
//!
//! Call [`store_actor::tracing::setup_tracing`] once at start-up:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod booking_system;

pub use booking_system::*;
