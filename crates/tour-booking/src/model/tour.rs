use crate::model::Price;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Tours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TourId(pub u32);

impl From<u32> for TourId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tour_{}", self.0)
    }
}

/// Catalog entry for a bookable tour. The slug is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: TourId,
    pub slug: String,
    pub name: String,
    pub price: Price,
    pub end_date: DateTime<Utc>,
}

impl Tour {
    /// Whether the tour is over at `now`. The end instant itself counts as ended.
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_date
    }
}

/// Payload for adding a tour to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourCreate {
    pub slug: String,
    pub name: String,
    pub price: Price,
    pub end_date: DateTime<Utc>,
}

/// Payload for editing a catalog entry. The slug is fixed once created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TourUpdate {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub enum TourFilter {
    All,
    Slug(String),
    EndedBy(DateTime<Utc>),
}
