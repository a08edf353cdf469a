//! Error types for the History actor.

use store_actor::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HistoryError {
    #[error("History record not found: {0}")]
    NotFound(String),

    /// A record for this order already exists.
    #[error("Order already archived: {0}")]
    AlreadyArchived(String),

    #[error("History validation error: {0}")]
    Validation(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for HistoryError {
    fn from(e: StoreError) -> Self {
        match e.downcast_document::<HistoryError>() {
            Ok(history_error) => history_error,
            Err(StoreError::NotFound(id)) => HistoryError::NotFound(id),
            Err(StoreError::DuplicateKey(order_id)) => HistoryError::AlreadyArchived(order_id),
            Err(other) => HistoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
