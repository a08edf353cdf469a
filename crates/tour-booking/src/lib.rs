//! # Tour Booking Back Office
//!
//! Order lifecycle, revenue reporting and order expiry for a tour-booking
//! shop, built on [`store_actor`] collections.
//!
//! - **[model]**: documents ([`Order`](model::Order), [`Tour`](model::Tour),
//!   [`HistoryRecord`](model::HistoryRecord), [`RevenueReport`](model::RevenueReport)) and their payloads.
//! - **Actor modules** ([`order_actor`], [`tour_actor`], [`history_actor`],
//!   [`revenue_actor`]): the `Document` implementation and error type of each collection.
//! - **[clients]**: typed wrappers that hide the message passing.
//! - **[engine]**: [`OrderLifecycle`](engine::OrderLifecycle), the state machine and
//!   the archive-and-credit workflow.
//! - **[sweeper]**: [`ExpirySweeper`](sweeper::ExpirySweeper), periodic expiry and archival.
//! - **[lifecycle]**: [`BookingSystem`](lifecycle::BookingSystem), which starts and stops it all.

pub mod clients;
pub mod config;
pub mod engine;
pub mod history_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod revenue_actor;
pub mod sweeper;
pub mod tour_actor;
