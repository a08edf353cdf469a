//! Order collection: placement, status transitions and bulk expiry.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use store_actor::CollectionActor;

/// Creates a new Order actor and its client.
///
/// The actor needs a [`TourClient`](crate::clients::TourClient) as its
/// context; pass it to [`CollectionActor::run`].
pub fn new(buffer: usize) -> (CollectionActor<Order>, OrderClient) {
    let (actor, generic_client) = CollectionActor::new(buffer);
    (actor, OrderClient::new(generic_client))
}
