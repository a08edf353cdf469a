//! # Order Lifecycle Engine
//!
//! Moves orders through `PendingPayment → AwaitingConfirmation → Completed`
//! and archives them into history once their tour is over.
//!
//! ## Archiving
//!
//! Archiving an order is a sequence of requests to four collections, not a
//! transaction:
//!
//! 1. **Guard** - if a history record already exists for the order, remove
//!    any leftover order and stop with [`LifecycleError::AlreadyArchived`].
//! 2. **Load** - the order and the tour named by its first item.
//! 3. **Gate** - [`OrderLifecycle::archive_if_tour_ended`] stops with
//!    [`ArchiveOutcome::NotYetEnded`] before the tour's end date;
//!    [`OrderLifecycle::force_archive`] skips this step.
//! 4. **Claim** - insert the history record. The order id is unique in the
//!    archive, so of two concurrent attempts only one gets past this step.
//! 5. **Credit** - add the order total to the revenue report of the local
//!    calendar month of completion.
//! 6. **Remove** - delete the order.
//!
//! A retry after a failure in step 6 is absorbed by the guard. A failure
//! between steps 4 and 5 leaves the revenue uncredited.

mod auth;
mod clock;
mod error;

pub use auth::*;
pub use clock::*;
pub use error::*;

use crate::clients::{HistoryClient, OrderClient, RevenueClient, TourClient};
use crate::history_actor::HistoryError;
use crate::model::{
    HistoryCreate, HistoryRecord, Order, OrderFilter, OrderId, OrderStatus, RevenuePeriod,
    RevenueReport, Tour,
};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use store_actor::CollectionHandle;
use tracing::{debug, info, instrument, warn};

/// Result of a time-gated archive attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveOutcome {
    Archived(HistoryRecord),
    /// The tour is still running. Nothing was written.
    NotYetEnded { end_date: DateTime<Utc> },
}

/// The write path from orders into history and revenue.
#[derive(Clone)]
pub struct OrderLifecycle {
    orders: OrderClient,
    tours: TourClient,
    history: HistoryClient,
    revenue: RevenueClient,
    clock: Arc<dyn Clock>,
}

impl OrderLifecycle {
    pub fn new(
        orders: OrderClient,
        tours: TourClient,
        history: HistoryClient,
        revenue: RevenueClient,
    ) -> Self {
        Self {
            orders,
            tours,
            history,
            revenue,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn orders(&self) -> &OrderClient {
        &self.orders
    }

    /// Confirms a paid order: `AwaitingConfirmation → Completed`.
    ///
    /// # Errors
    /// - `Forbidden` unless `auth` is an administrator
    /// - `NotFound` if the order or its tour is missing
    /// - `InvalidState` if the order is not awaiting confirmation
    #[instrument(skip(self, auth))]
    pub async fn confirm_payment(
        &self,
        auth: &AuthContext,
        order_id: OrderId,
    ) -> Result<Order, LifecycleError> {
        auth.require_admin()?;
        let order = self.load_order(order_id).await?;
        if order.status != OrderStatus::AwaitingConfirmation {
            warn!(status = %order.status, "Refusing to confirm payment");
            return Err(LifecycleError::InvalidState {
                order_id,
                expected: OrderStatus::AwaitingConfirmation,
                actual: order.status,
            });
        }
        self.load_tour(&order).await?;

        let confirmed = match self.orders.advance(order_id, OrderStatus::Completed).await {
            Ok(confirmed) => confirmed,
            // Status changed between the read and the write.
            Err(OrderError::InvalidTransition { from, .. }) => {
                return Err(LifecycleError::InvalidState {
                    order_id,
                    expected: OrderStatus::AwaitingConfirmation,
                    actual: from,
                })
            }
            Err(e) => return Err(e.into()),
        };
        info!("Payment confirmed");
        Ok(confirmed)
    }

    /// Archives the order if its tour has ended by the clock's `now`.
    pub async fn archive_if_tour_ended(
        &self,
        order_id: OrderId,
    ) -> Result<ArchiveOutcome, LifecycleError> {
        self.archive_if_tour_ended_at(order_id, self.now()).await
    }

    /// Archives the order if its tour has ended by `now`.
    #[instrument(skip(self))]
    pub async fn archive_if_tour_ended_at(
        &self,
        order_id: OrderId,
        now: DateTime<Utc>,
    ) -> Result<ArchiveOutcome, LifecycleError> {
        let (order, tour) = self.prepare_archive(order_id).await?;
        if !tour.has_ended(now) {
            debug!(end_date = %tour.end_date, "Tour still running");
            return Ok(ArchiveOutcome::NotYetEnded {
                end_date: tour.end_date,
            });
        }
        ensure_archivable(&order)?;
        let record = self.commit_archive(order, tour, now).await?;
        Ok(ArchiveOutcome::Archived(record))
    }

    /// Archives the order regardless of the tour's end date.
    ///
    /// # Errors
    /// - `Forbidden` unless `auth` is an administrator
    /// - `InvalidState` for an order still in `PendingPayment`: unpaid
    ///   orders are never archived, not even by an administrator
    /// - `AlreadyArchived` if the order has a history record
    /// - `NotFound` if the order or its tour is missing
    #[instrument(skip(self, auth))]
    pub async fn force_archive(
        &self,
        auth: &AuthContext,
        order_id: OrderId,
    ) -> Result<HistoryRecord, LifecycleError> {
        auth.require_admin()?;
        let (order, tour) = self.prepare_archive(order_id).await?;
        ensure_archivable(&order)?;
        self.commit_archive(order, tour, self.now()).await
    }

    /// Orders in one status, oldest first.
    #[instrument(skip(self, auth))]
    pub async fn orders_with_status(
        &self,
        auth: &AuthContext,
        status: OrderStatus,
    ) -> Result<Vec<Order>, LifecycleError> {
        auth.require_admin()?;
        let mut orders = self.orders.find(OrderFilter::with_status(status)).await?;
        orders.sort_by_key(|order| order.created_at);
        Ok(orders)
    }

    /// Removes an unpaid order.
    #[instrument(skip(self, auth))]
    pub async fn delete_pending_order(
        &self,
        auth: &AuthContext,
        order_id: OrderId,
    ) -> Result<(), LifecycleError> {
        auth.require_admin()?;
        let order = self.load_order(order_id).await?;
        if order.status != OrderStatus::PendingPayment {
            return Err(LifecycleError::InvalidState {
                order_id,
                expected: OrderStatus::PendingPayment,
                actual: order.status,
            });
        }
        self.orders.delete_by_id(order_id).await?;
        info!("Pending order deleted");
        Ok(())
    }

    /// Every revenue report, newest period first.
    #[instrument(skip(self, auth))]
    pub async fn revenue_reports(
        &self,
        auth: &AuthContext,
    ) -> Result<Vec<RevenueReport>, LifecycleError> {
        auth.require_admin()?;
        let mut reports = self.revenue.all().await?;
        if reports.is_empty() {
            return Err(LifecycleError::NotFound("revenue reports".to_string()));
        }
        reports.reverse();
        Ok(reports)
    }

    /// A customer's archived bookings, newest first.
    pub async fn history_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<HistoryRecord>, LifecycleError> {
        Ok(self.history.for_user(user_id).await?)
    }

    async fn prepare_archive(&self, order_id: OrderId) -> Result<(Order, Tour), LifecycleError> {
        if self.history.find_by_order_id(order_id).await?.is_some() {
            self.remove_order(order_id).await?;
            warn!("Order already archived");
            return Err(LifecycleError::AlreadyArchived(order_id));
        }
        let order = self.load_order(order_id).await?;
        let tour = self.load_tour(&order).await?;
        Ok((order, tour))
    }

    async fn commit_archive(
        &self,
        order: Order,
        tour: Tour,
        now: DateTime<Utc>,
    ) -> Result<HistoryRecord, LifecycleError> {
        let claim = HistoryCreate {
            user_id: order.user_id.clone(),
            order_id: order.id,
            completed_at: now,
            end_date: tour.end_date,
            items: order.items.iter().map(Into::into).collect(),
        };
        let record = match self.history.archive(claim).await {
            Ok(record) => record,
            Err(HistoryError::AlreadyArchived(_)) => {
                warn!("Lost archive race, revenue left untouched");
                return Err(LifecycleError::AlreadyArchived(order.id));
            }
            Err(e) => return Err(e.into()),
        };

        let period = RevenuePeriod::from_local(now);
        let report = self.revenue.add(period, order.total(), 1).await?;
        self.remove_order(order.id).await?;

        info!(
            history_id = %record.id,
            period = %period,
            total_revenue = %report.total_revenue,
            "Order archived"
        );
        Ok(record)
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order, LifecycleError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("order {order_id}")))
    }

    async fn load_tour(&self, order: &Order) -> Result<Tour, LifecycleError> {
        let slug = order
            .tour_slug()
            .ok_or_else(|| LifecycleError::NotFound(format!("tour for {}", order.id)))?;
        self.tours
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| LifecycleError::NotFound(format!("tour {slug}")))
    }

    // An order that is already gone is fine here.
    async fn remove_order(&self, order_id: OrderId) -> Result<(), LifecycleError> {
        match self.orders.delete_by_id(order_id).await {
            Ok(()) | Err(OrderError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// Unpaid orders are never revenue.
fn ensure_archivable(order: &Order) -> Result<(), LifecycleError> {
    if order.status == OrderStatus::PendingPayment {
        return Err(LifecycleError::InvalidState {
            order_id: order.id,
            expected: OrderStatus::AwaitingConfirmation,
            actual: order.status,
        });
    }
    Ok(())
}
