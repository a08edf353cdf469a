//! History archive collection. Append-only; one record per order.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::HistoryClient;
use crate::model::HistoryRecord;
use store_actor::CollectionActor;

/// Creates a new History actor and its client.
pub fn new(buffer: usize) -> (CollectionActor<HistoryRecord>, HistoryClient) {
    let (actor, generic_client) = CollectionActor::new(buffer);
    (actor, HistoryClient::new(generic_client))
}
