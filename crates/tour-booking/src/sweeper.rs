//! # Expiry Sweeper
//!
//! Time-based batch jobs over the order collection:
//!
//! - [`ExpirySweeper::sweep_pending_payment`] deletes unpaid orders older than
//!   the threshold. No archival; abandoned orders are not revenue.
//! - [`ExpirySweeper::sweep_completed_tours`] archives paid orders whose tour
//!   has ended, one by one, and keeps going when one of them fails.
//!
//! [`ExpirySweeper::run`] repeats both on an interval until shut down.

use crate::engine::{ArchiveOutcome, LifecycleError, OrderLifecycle};
use crate::model::{OrderFilter, OrderId, OrderStatus};
use chrono::{DateTime, TimeDelta, Utc};
use store_actor::CollectionHandle;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

/// Floor for the sweep period; a zero interval cannot be scheduled.
pub const MIN_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

fn pending_cutoff(now: DateTime<Utc>, threshold_hours: i64) -> Result<DateTime<Utc>, LifecycleError> {
    if threshold_hours <= 0 {
        return Err(LifecycleError::InvalidThreshold(threshold_hours));
    }
    TimeDelta::try_hours(threshold_hours)
        .and_then(|ttl| now.checked_sub_signed(ttl))
        .ok_or(LifecycleError::InvalidThreshold(threshold_hours))
}

/// One order the sweep could not handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFailure {
    pub order_id: OrderId,
    pub error: LifecycleError,
}

/// What one sweep did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Unpaid orders deleted for being too old.
    pub deleted_pending: usize,
    pub archived: Vec<OrderId>,
    /// Leftover orders removed because history already had them.
    pub already_archived: Vec<OrderId>,
    /// Orders whose tour is still running.
    pub waiting: usize,
    pub failures: Vec<SweepFailure>,
}

#[derive(Clone)]
pub struct ExpirySweeper {
    lifecycle: OrderLifecycle,
    pending_ttl_hours: i64,
}

impl ExpirySweeper {
    pub fn new(lifecycle: OrderLifecycle, pending_ttl_hours: i64) -> Self {
        Self {
            lifecycle,
            pending_ttl_hours,
        }
    }

    /// Deletes every unpaid order created at or before `now - threshold_hours`.
    /// Returns how many were deleted.
    ///
    /// # Errors
    /// `InvalidThreshold` unless `threshold_hours` is positive and the cutoff
    /// is a representable instant. Nothing is deleted in that case.
    #[instrument(skip(self))]
    pub async fn sweep_pending_payment(
        &self,
        now: DateTime<Utc>,
        threshold_hours: i64,
    ) -> Result<usize, LifecycleError> {
        let cutoff = pending_cutoff(now, threshold_hours)?;
        let filter = OrderFilter::with_status(OrderStatus::PendingPayment).created_at_or_before(cutoff);
        let deleted = self.lifecycle.orders().delete_many(filter).await?;
        if deleted > 0 {
            info!(deleted, cutoff = %cutoff, "Expired unpaid orders removed");
        }
        Ok(deleted)
    }

    /// Tries to archive every paid order as of `now`.
    ///
    /// Only listing the orders can fail the sweep; per-order errors are
    /// collected in the report.
    #[instrument(skip(self))]
    pub async fn sweep_completed_tours(
        &self,
        now: DateTime<Utc>,
    ) -> Result<SweepReport, LifecycleError> {
        let candidates = self
            .lifecycle
            .orders()
            .find(OrderFilter::with_statuses(&[
                OrderStatus::AwaitingConfirmation,
                OrderStatus::Completed,
            ]))
            .await?;
        debug!(candidates = candidates.len(), "Checking paid orders");

        let mut report = SweepReport::default();
        for order in candidates {
            match self.lifecycle.archive_if_tour_ended_at(order.id, now).await {
                Ok(ArchiveOutcome::Archived(_)) => report.archived.push(order.id),
                Ok(ArchiveOutcome::NotYetEnded { .. }) => report.waiting += 1,
                Err(LifecycleError::AlreadyArchived(id)) => report.already_archived.push(id),
                Err(error) => {
                    warn!(order_id = %order.id, error = %error, "Could not archive order");
                    report.failures.push(SweepFailure {
                        order_id: order.id,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Both sweeps, with the configured pending-payment threshold.
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> Result<SweepReport, LifecycleError> {
        let deleted_pending = self.sweep_pending_payment(now, self.pending_ttl_hours).await?;
        let report = self.sweep_completed_tours(now).await?;
        Ok(SweepReport {
            deleted_pending,
            ..report
        })
    }

    /// Sweeps every `every` until `shutdown` becomes `true` or its sender is
    /// dropped. The first sweep runs immediately.
    pub async fn run(self, every: std::time::Duration, mut shutdown: watch::Receiver<bool>) {
        let every = if every.is_zero() {
            warn!("Sweep interval is zero, using {:?}", MIN_SWEEP_INTERVAL);
            MIN_SWEEP_INTERVAL
        } else {
            every
        };
        info!(interval_secs = every.as_secs(), "Expiry sweeper started");
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = self.lifecycle.now();
                    match self.sweep_once(now).await {
                        Ok(report) => info!(
                            deleted_pending = report.deleted_pending,
                            archived = report.archived.len(),
                            waiting = report.waiting,
                            failures = report.failures.len(),
                            "Sweep finished"
                        ),
                        Err(e) => error!(error = %e, "Sweep failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Expiry sweeper stopped");
    }
}
