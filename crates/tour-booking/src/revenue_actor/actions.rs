use crate::model::Price;

/// Custom actions for revenue reports.
#[derive(Debug, Clone)]
pub enum RevenueAction {
    /// Adds completed orders to the running totals. Returns the updated report.
    Accumulate { amount: Price, orders: u64 },
}
