//! Error types for the Order actor.

use crate::model::OrderStatus;
use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order must contain at least one item.
    #[error("Order has no items")]
    EmptyOrder,

    /// The tour referenced by the order is not in the catalog.
    #[error("Unknown tour: {0}")]
    UnknownTour(String),

    /// The requested status change skips or reverses a step.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e.downcast_document::<OrderError>() {
            Ok(order_error) => order_error,
            Err(StoreError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
