//! Tour catalog collection. Slugs are a unique key.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::TourClient;
use crate::model::Tour;
use store_actor::CollectionActor;

/// Creates a new Tour actor and its client.
pub fn new(buffer: usize) -> (CollectionActor<Tour>, TourClient) {
    let (actor, generic_client) = CollectionActor::new(buffer);
    (actor, TourClient::new(generic_client))
}
