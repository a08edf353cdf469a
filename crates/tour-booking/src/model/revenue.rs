use crate::model::Price;
use crate::revenue_actor::RevenueError;
use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for revenue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevenueId(pub u32);

impl From<u32> for RevenueId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RevenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "revenue_{}", self.0)
    }
}

/// Calendar month a report covers. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevenuePeriod {
    year: i32,
    month: u32,
}

impl RevenuePeriod {
    /// `month` is 1-based.
    pub fn new(month: u32, year: i32) -> Result<Self, RevenueError> {
        if !(1..=12).contains(&month) {
            return Err(RevenueError::InvalidPeriod { month, year });
        }
        Ok(Self { year, month })
    }

    /// The local-time calendar month containing `instant`.
    pub fn from_local(instant: DateTime<Utc>) -> Self {
        let local = instant.with_timezone(&Local);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Display for RevenuePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Running totals for one period. Totals only grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub id: RevenueId,
    pub period: RevenuePeriod,
    pub total_revenue: Price,
    pub total_orders: u64,
}

/// Opens a report with zero totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueCreate {
    pub period: RevenuePeriod,
}

#[derive(Debug, Clone)]
pub enum RevenueFilter {
    All,
    Period(RevenuePeriod),
}
