//! # History Client
//!
//! Append-only access to the archive. `archive` is the only write; the
//! unique order id turns a second archive of the same order into
//! [`HistoryError::AlreadyArchived`].
use crate::history_actor::HistoryError;
use crate::model::{HistoryCreate, HistoryFilter, HistoryRecord, OrderId};
use async_trait::async_trait;
use store_actor::{CollectionClient, CollectionHandle, Document, StoreError};
use tracing::{debug, info, instrument};

/// Client for interacting with the History actor.
#[derive(Clone)]
pub struct HistoryClient {
    inner: CollectionClient<HistoryRecord>,
}

impl HistoryClient {
    pub fn new(inner: CollectionClient<HistoryRecord>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn find_by_order_id(
        &self,
        order_id: OrderId,
    ) -> Result<Option<HistoryRecord>, HistoryError> {
        debug!("Sending request");
        let records = self
            .inner
            .find(HistoryFilter::Order(order_id))
            .await
            .map_err(HistoryError::from)?;
        Ok(records.into_iter().next())
    }

    /// Inserts the record and returns it as stored.
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub async fn archive(&self, params: HistoryCreate) -> Result<HistoryRecord, HistoryError> {
        debug!("Sending request");
        let stored = params.clone();
        let id = self.inner.create(params).await.map_err(HistoryError::from)?;
        info!(history_id = %id, "Order archived");
        HistoryRecord::from_create_params(id, stored)
    }

    /// A customer's archived bookings, most recently completed first.
    #[instrument(skip(self))]
    pub async fn for_user(&self, user_id: &str) -> Result<Vec<HistoryRecord>, HistoryError> {
        debug!("Sending request");
        let mut records = self
            .inner
            .find(HistoryFilter::User(user_id.to_string()))
            .await
            .map_err(HistoryError::from)?;
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }
}

#[async_trait]
impl CollectionHandle<HistoryRecord> for HistoryClient {
    type Error = HistoryError;

    fn inner(&self) -> &CollectionClient<HistoryRecord> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        HistoryError::from(e)
    }
}
