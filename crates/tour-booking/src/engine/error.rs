//! Errors surfaced by the order lifecycle to callers.

use crate::history_actor::HistoryError;
use crate::model::{OrderId, OrderStatus};
use crate::order_actor::OrderError;
use crate::revenue_actor::RevenueError;
use crate::tour_actor::TourError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    /// The order or its tour is missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The order is not in a status the operation accepts. The order is unchanged.
    #[error("{order_id} is {actual}, expected {expected}")]
    InvalidState {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// A history record already exists for the order.
    #[error("{0} has already been archived")]
    AlreadyArchived(OrderId),

    /// An expiry threshold that is not a positive number of hours, or
    /// reaches outside the supported calendar.
    #[error("Invalid expiry threshold: {0} hours")]
    InvalidThreshold(i64),

    /// The caller is not allowed to perform the operation.
    #[error("Administrator access required")]
    Forbidden,

    /// A collection failed to answer. Detail is for logs only.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LifecycleError {
    /// Text safe to show an end user. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            LifecycleError::Storage(_) => "Something went wrong, please try again later".to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn storage(source: impl std::fmt::Display) -> Self {
        error!(error = %source, "Storage failure");
        LifecycleError::Storage(source.to_string())
    }
}

impl From<OrderError> for LifecycleError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => LifecycleError::NotFound(format!("order {id}")),
            other => LifecycleError::storage(other),
        }
    }
}

impl From<TourError> for LifecycleError {
    fn from(e: TourError) -> Self {
        match e {
            TourError::NotFound(id) => LifecycleError::NotFound(format!("tour {id}")),
            other => LifecycleError::storage(other),
        }
    }
}

impl From<HistoryError> for LifecycleError {
    fn from(e: HistoryError) -> Self {
        LifecycleError::storage(e)
    }
}

impl From<RevenueError> for LifecycleError {
    fn from(e: RevenueError) -> Self {
        match e {
            RevenueError::NotFound(period) => {
                LifecycleError::NotFound(format!("revenue report {period}"))
            }
            other => LifecycleError::storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_storage_detail() {
        let err = LifecycleError::Storage("Collection actor closed".into());
        assert!(!err.user_message().contains("actor"));

        let err = LifecycleError::InvalidState {
            order_id: OrderId(2),
            expected: OrderStatus::AwaitingConfirmation,
            actual: OrderStatus::PendingPayment,
        };
        assert_eq!(
            err.user_message(),
            "order_2 is pending payment, expected paid, awaiting confirmation"
        );
    }
}
