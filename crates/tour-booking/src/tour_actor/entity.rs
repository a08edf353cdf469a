//! Document trait implementation for the Tour domain type.

use super::error::TourError;
use crate::model::{Tour, TourCreate, TourFilter, TourId, TourUpdate};
use async_trait::async_trait;
use std::convert::Infallible;
use store_actor::Document;

#[async_trait]
impl Document for Tour {
    type Id = TourId;
    type Create = TourCreate;
    type Update = TourUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Filter = TourFilter;
    type Context = ();
    type Error = TourError;

    fn from_create_params(id: TourId, params: TourCreate) -> Result<Self, TourError> {
        let slug = params.slug.trim().to_string();
        if slug.is_empty() {
            return Err(TourError::Validation("slug must not be empty".into()));
        }
        Ok(Self {
            id,
            slug,
            name: params.name,
            price: params.price,
            end_date: params.end_date,
        })
    }

    fn matches(&self, filter: &TourFilter) -> bool {
        match filter {
            TourFilter::All => true,
            TourFilter::Slug(slug) => self.slug == *slug,
            TourFilter::EndedBy(now) => self.has_ended(*now),
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.slug.clone())
    }

    /// Handles updates to the Tour entity.
    ///
    /// # Fields Updated
    /// - `name`: must not be blank
    /// - `price`: ticket price
    /// - `end_date`: when the tour is over
    async fn on_update(&mut self, update: TourUpdate, _ctx: &()) -> Result<(), TourError> {
        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(TourError::Validation("name must not be empty".into()));
            }
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), TourError> {
        match action {}
    }
}
