//! # Tour Client
//!
//! Catalog access. The order lifecycle only reads tours; `add_tour` and
//! `update_tour` are for catalog management and seeding.
use crate::model::{Tour, TourCreate, TourFilter, TourId, TourUpdate};
use crate::tour_actor::TourError;
use async_trait::async_trait;
use store_actor::{CollectionClient, CollectionHandle, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the Tour actor.
#[derive(Clone)]
pub struct TourClient {
    inner: CollectionClient<Tour>,
}

impl TourClient {
    pub fn new(inner: CollectionClient<Tour>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Tour>, TourError> {
        debug!("Sending request");
        let tours = self
            .inner
            .find(TourFilter::Slug(slug.to_string()))
            .await
            .map_err(TourError::from)?;
        Ok(tours.into_iter().next())
    }

    #[instrument(skip(self, params), fields(slug = %params.slug))]
    pub async fn add_tour(&self, params: TourCreate) -> Result<TourId, TourError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(TourError::from)?;
        info!(tour_id = %id, "Tour added to catalog");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_tour(&self, id: TourId, update: TourUpdate) -> Result<Tour, TourError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(TourError::from)
    }
}

#[async_trait]
impl CollectionHandle<Tour> for TourClient {
    type Error = TourError;

    fn inner(&self) -> &CollectionClient<Tour> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        TourError::from(e)
    }
}
