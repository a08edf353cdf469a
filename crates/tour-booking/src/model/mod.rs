//! Stored documents and their payloads. Each type implements
//! [`Document`](store_actor::Document) in its collection's actor module.

pub mod history;
pub mod order;
pub mod price;
pub mod revenue;
pub mod tour;

pub use history::*;
pub use order::*;
pub use price::*;
pub use revenue::*;
pub use tour::*;
