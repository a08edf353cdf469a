//! # CollectionHandle Trait
//!
//! Shared surface for domain-specific clients: implement `inner` and
//! `map_error` once and inherit the standard collection operations.
use crate::{CollectionClient, Document, StoreError};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`CollectionClient`].
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct TourClient {
///     inner: CollectionClient<Tour>,
/// }
///
/// #[async_trait]
/// impl CollectionHandle<Tour> for TourClient {
///     type Error = TourError;
///     fn inner(&self) -> &CollectionClient<Tour> { &self.inner }
///     fn map_error(e: StoreError) -> TourError { TourError::from(e) }
/// }
///
/// // find_by_id, find, delete_by_id and delete_many come for free.
/// let tour = tour_client.find_by_id(id).await?;
/// ```
#[async_trait]
pub trait CollectionHandle<T: Document>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the generic client.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a document by id.
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every document matching `filter`, in id order.
    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(filter).await.map_err(Self::map_error)
    }

    /// Delete a document by id.
    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Delete every document matching `filter` and return how many went.
    #[tracing::instrument(skip(self))]
    async fn delete_many(&self, filter: T::Filter) -> Result<usize, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete_many(filter).await.map_err(Self::map_error)
    }
}
