//! Error types for the Tour actor.

use store_actor::StoreError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TourError {
    #[error("Tour not found: {0}")]
    NotFound(String),

    /// Another tour already uses this slug.
    #[error("Duplicate tour slug: {0}")]
    DuplicateSlug(String),

    #[error("Tour validation error: {0}")]
    Validation(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for TourError {
    fn from(e: StoreError) -> Self {
        match e.downcast_document::<TourError>() {
            Ok(tour_error) => tour_error,
            Err(StoreError::NotFound(id)) => TourError::NotFound(id),
            Err(StoreError::DuplicateKey(slug)) => TourError::DuplicateSlug(slug),
            Err(other) => TourError::ActorCommunicationError(other.to_string()),
        }
    }
}
