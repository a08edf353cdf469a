use crate::model::{OrderId, OrderItem, Price};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HistoryId(pub u32);

impl From<u32> for HistoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for HistoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "history_{}", self.0)
    }
}

/// What the archive keeps of an order item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl From<&OrderItem> for HistoryItem {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

/// Immutable record of an archived booking; at most one per order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: HistoryId,
    pub user_id: String,
    pub order_id: OrderId,
    pub completed_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub items: Vec<HistoryItem>,
}

impl HistoryRecord {
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryCreate {
    pub user_id: String,
    pub order_id: OrderId,
    pub completed_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub items: Vec<HistoryItem>,
}

#[derive(Debug, Clone)]
pub enum HistoryFilter {
    All,
    Order(OrderId),
    User(String),
}
