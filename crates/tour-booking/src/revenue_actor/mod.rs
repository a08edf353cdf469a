//! Revenue report collection: one running total per calendar month.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::RevenueClient;
use crate::model::RevenueReport;
use store_actor::CollectionActor;

/// Creates a new Revenue actor and its client.
pub fn new(buffer: usize) -> (CollectionActor<RevenueReport>, RevenueClient) {
    let (actor, generic_client) = CollectionActor::new(buffer);
    (actor, RevenueClient::new(generic_client))
}
