use crate::model::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Where an order is in its lifecycle. Orders only move forward:
/// `PendingPayment → AwaitingConfirmation → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Checked out, not paid yet.
    PendingPayment,
    /// Paid, waiting for an administrator to confirm.
    AwaitingConfirmation,
    /// Confirmed; archived into history once the tour ends.
    Completed,
}

impl OrderStatus {
    /// The status that follows this one, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::PendingPayment => Some(OrderStatus::AwaitingConfirmation),
            OrderStatus::AwaitingConfirmation => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Whether `self → to` is a legal single step.
    pub fn can_advance_to(self, to: OrderStatus) -> bool {
        self.next() == Some(to)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OrderStatus::PendingPayment => "pending payment",
            OrderStatus::AwaitingConfirmation => "paid, awaiting confirmation",
            OrderStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// One booked tour inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub slug: String,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl OrderItem {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// Represents a customer booking.
///
/// # Store Actor
/// This struct implements the [`Document`](store_actor::Document) trait,
/// allowing it to be managed by a [`CollectionActor`](store_actor::CollectionActor).
///
/// See [`impl Document for Order`](#impl-Document-for-Order) for details on:
/// - Creation parameters ([`OrderCreate`])
/// - Queries ([`OrderFilter`])
/// - Status transitions ([`OrderAction`](crate::order_actor::OrderAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Slug of the tour that represents the whole order (its first item).
    pub fn tour_slug(&self) -> Option<&str> {
        self.items.first().map(|item| item.slug.as_str())
    }

    /// Sum of all item prices.
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }
}

/// Payload for placing an order.
///
/// Checkout normally creates orders in `PendingPayment`; `with_status` and
/// `placed_at` exist for imports and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderCreate {
    pub fn new(user_id: impl Into<String>, items: Vec<OrderItem>) -> Self {
        Self {
            user_id: user_id.into(),
            items,
            status: OrderStatus::PendingPayment,
            created_at: Utc::now(),
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn placed_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Query over the order collection. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub statuses: Vec<OrderStatus>,
    pub created_at_or_before: Option<DateTime<Utc>>,
    pub user_id: Option<String>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_status(status: OrderStatus) -> Self {
        Self::with_statuses(&[status])
    }

    pub fn with_statuses(statuses: &[OrderStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            ..Self::default()
        }
    }

    pub fn created_at_or_before(mut self, cutoff: DateTime<Utc>) -> Self {
        self.created_at_or_before = Some(cutoff);
        self
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        (self.statuses.is_empty() || self.statuses.contains(&order.status))
            && self
                .created_at_or_before
                .map_or(true, |cutoff| order.created_at <= cutoff)
            && self
                .user_id
                .as_ref()
                .map_or(true, |user| *user == order.user_id)
    }
}
