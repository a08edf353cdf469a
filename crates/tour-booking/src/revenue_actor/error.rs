//! Error types for the Revenue actor.

use store_actor::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RevenueError {
    #[error("Revenue report not found: {0}")]
    NotFound(String),

    #[error("Invalid period: month {month} of {year}")]
    InvalidPeriod { month: u32, year: i32 },

    /// A report for this period already exists.
    #[error("Duplicate revenue period: {0}")]
    DuplicatePeriod(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<StoreError> for RevenueError {
    fn from(e: StoreError) -> Self {
        match e.downcast_document::<RevenueError>() {
            Ok(revenue_error) => revenue_error,
            Err(StoreError::NotFound(id)) => RevenueError::NotFound(id),
            Err(StoreError::DuplicateKey(period)) => RevenueError::DuplicatePeriod(period),
            Err(other) => RevenueError::ActorCommunicationError(other.to_string()),
        }
    }
}
