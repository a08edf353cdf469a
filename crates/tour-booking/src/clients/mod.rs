//! Domain clients: one typed wrapper per collection.
//!
//! Each wraps a [`CollectionClient`](store_actor::CollectionClient), inherits
//! the standard lookups from [`CollectionHandle`](store_actor::CollectionHandle)
//! and adds the operations its collection supports.

pub mod history_client;
pub mod order_client;
pub mod revenue_client;
pub mod tour_client;

pub use history_client::HistoryClient;
pub use order_client::OrderClient;
pub use revenue_client::RevenueClient;
pub use store_actor::CollectionHandle;
pub use tour_client::TourClient;
