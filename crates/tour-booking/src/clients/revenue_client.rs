//! # Revenue Client
//!
//! Get-or-create and accumulate for monthly revenue reports. Reports are
//! running totals and are never recomputed from history.
use crate::model::{Price, RevenueCreate, RevenueFilter, RevenuePeriod, RevenueReport};
use crate::revenue_actor::{RevenueAction, RevenueError};
use async_trait::async_trait;
use store_actor::{CollectionClient, CollectionHandle, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Revenue actor.
#[derive(Clone)]
pub struct RevenueClient {
    inner: CollectionClient<RevenueReport>,
}

impl RevenueClient {
    pub fn new(inner: CollectionClient<RevenueReport>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, period), fields(period = %period))]
    pub async fn find_by_period(
        &self,
        period: RevenuePeriod,
    ) -> Result<Option<RevenueReport>, RevenueError> {
        debug!("Sending request");
        let reports = self
            .inner
            .find(RevenueFilter::Period(period))
            .await
            .map_err(RevenueError::from)?;
        Ok(reports.into_iter().next())
    }

    /// Returns the report for `period`, opening an empty one if needed.
    ///
    /// If another caller opens the same period first, the insert fails on
    /// the unique period and the winner's report is read back instead.
    #[instrument(skip(self, period), fields(period = %period))]
    pub async fn get_or_create(&self, period: RevenuePeriod) -> Result<RevenueReport, RevenueError> {
        if let Some(report) = self.find_by_period(period).await? {
            return Ok(report);
        }

        match self.inner.create(RevenueCreate { period }).await {
            Ok(id) => {
                info!(revenue_id = %id, "Opened revenue report");
                Ok(RevenueReport {
                    id,
                    period,
                    total_revenue: Price::ZERO,
                    total_orders: 0,
                })
            }
            Err(StoreError::DuplicateKey(_)) => {
                debug!("Report opened concurrently, reading it back");
                self.find_by_period(period)
                    .await?
                    .ok_or_else(|| RevenueError::NotFound(period.to_string()))
            }
            Err(e) => Err(RevenueError::from(e)),
        }
    }

    /// Adds `amount` and `orders` to the report for `period`.
    #[instrument(skip(self, period, amount), fields(period = %period, amount = %amount))]
    pub async fn add(
        &self,
        period: RevenuePeriod,
        amount: Price,
        orders: u64,
    ) -> Result<RevenueReport, RevenueError> {
        let report = self.get_or_create(period).await?;
        let updated = self
            .inner
            .perform_action(report.id, RevenueAction::Accumulate { amount, orders })
            .await
            .map_err(RevenueError::from)?;
        info!(
            total_revenue = %updated.total_revenue,
            total_orders = updated.total_orders,
            "Revenue credited"
        );
        Ok(updated)
    }

    /// Every report, oldest period first.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<RevenueReport>, RevenueError> {
        debug!("Sending request");
        let mut reports = self
            .inner
            .find(RevenueFilter::All)
            .await
            .map_err(RevenueError::from)?;
        reports.sort_by_key(|report| report.period);
        Ok(reports)
    }
}

#[async_trait]
impl CollectionHandle<RevenueReport> for RevenueClient {
    type Error = RevenueError;

    fn inner(&self) -> &CollectionClient<RevenueReport> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        RevenueError::from(e)
    }
}
