//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! Catalog validation happens in the actor's `on_create` hook; status
//! transitions are checked by the `Advance` action.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use store_actor::{CollectionClient, CollectionHandle, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores a new order after checking its tour exists.
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(items = params.items.len(), "Sending request");
        let id = self.inner.create(params).await.map_err(OrderError::from)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Moves an order to `status` and persists it. Returns the updated order.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance(status))
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl CollectionHandle<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        OrderError::from(e)
    }
}
