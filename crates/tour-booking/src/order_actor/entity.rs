//! Document trait implementation for the Order domain type.
//!
//! Orders validate their tour against the catalog when they are placed, so
//! the actor's context is a [`TourClient`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::TourClient;
use crate::model::{Order, OrderCreate, OrderFilter, OrderId};
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::Document;
use tracing::debug;

#[async_trait]
impl Document for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    // Orders change only through `OrderAction`.
    type Update = Infallible;
    type Action = OrderAction;
    type ActionResult = Order;
    type Filter = OrderFilter;
    type Context = TourClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            status: params.status,
            created_at: params.created_at,
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.matches(self)
    }

    /// Rejects empty orders and orders whose first tour is not in the catalog.
    async fn on_create(&mut self, tours: &TourClient) -> Result<(), OrderError> {
        let slug = self.tour_slug().ok_or(OrderError::EmptyOrder)?.to_string();
        debug!(order_id = %self.id, slug = %slug, "Checking tour for new order");
        match tours.find_by_slug(&slug).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::UnknownTour(slug)),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    async fn on_update(&mut self, update: Infallible, _tours: &TourClient) -> Result<(), OrderError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _tours: &TourClient,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Advance(to) => {
                if !self.status.can_advance_to(to) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to,
                    });
                }
                self.status = to;
                Ok(self.clone())
            }
        }
    }
}
