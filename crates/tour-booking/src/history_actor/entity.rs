//! Document trait implementation for history records.
//!
//! Records are immutable: there is no update payload and no action, and the
//! order id is the unique key that stops an order from being archived twice.

use super::error::HistoryError;
use crate::model::{HistoryCreate, HistoryFilter, HistoryId, HistoryRecord};
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::Document;

#[async_trait]
impl Document for HistoryRecord {
    type Id = HistoryId;
    type Create = HistoryCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = HistoryFilter;
    type Context = ();
    type Error = HistoryError;

    fn from_create_params(id: HistoryId, params: HistoryCreate) -> Result<Self, HistoryError> {
        if params.items.is_empty() {
            return Err(HistoryError::Validation(format!(
                "{} has no items to archive",
                params.order_id
            )));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            order_id: params.order_id,
            completed_at: params.completed_at,
            end_date: params.end_date,
            items: params.items,
        })
    }

    fn matches(&self, filter: &HistoryFilter) -> bool {
        match filter {
            HistoryFilter::All => true,
            HistoryFilter::Order(order_id) => self.order_id == *order_id,
            HistoryFilter::User(user_id) => self.user_id == *user_id,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.order_id.to_string())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), HistoryError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), HistoryError> {
        match action {}
    }
}
