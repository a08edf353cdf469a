//! Document trait implementation for revenue reports.
//!
//! Reports start at zero and only grow through [`RevenueAction::Accumulate`].

use super::actions::RevenueAction;
use super::error::RevenueError;
use crate::model::{Price, RevenueCreate, RevenueFilter, RevenueId, RevenueReport};
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::Document;

#[async_trait]
impl Document for RevenueReport {
    type Id = RevenueId;
    type Create = RevenueCreate;
    type Update = Infallible;
    type Action = RevenueAction;
    type ActionResult = RevenueReport;
    type Filter = RevenueFilter;
    type Context = ();
    type Error = RevenueError;

    fn from_create_params(id: RevenueId, params: RevenueCreate) -> Result<Self, RevenueError> {
        Ok(Self {
            id,
            period: params.period,
            total_revenue: Price::ZERO,
            total_orders: 0,
        })
    }

    fn matches(&self, filter: &RevenueFilter) -> bool {
        match filter {
            RevenueFilter::All => true,
            RevenueFilter::Period(period) => self.period == *period,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.period.to_string())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), RevenueError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: RevenueAction,
        _ctx: &(),
    ) -> Result<RevenueReport, RevenueError> {
        match action {
            RevenueAction::Accumulate { amount, orders } => {
                self.total_revenue += amount;
                self.total_orders = self.total_orders.saturating_add(orders);
                Ok(self.clone())
            }
        }
    }
}
