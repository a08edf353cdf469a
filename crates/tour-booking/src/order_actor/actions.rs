//! Custom actions for the Order actor.
//!
//! Status changes go through an action rather than a plain update so the
//! transition is checked inside the actor, against the stored status.

use crate::model::OrderStatus;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order one step forward to the given status.
    ///
    /// # Errors
    /// Fails with `InvalidTransition` unless the target is the next status.
    Advance(OrderStatus),
}
