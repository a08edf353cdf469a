//! # Collection Actor
//!
//! `CollectionActor` is the server half of a collection: it owns the
//! documents and processes one request at a time, which is what makes the
//! collection consistent without any locking.

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns one collection of documents.
///
/// # Usage Pattern
///
/// 1. **Create**: `CollectionActor::new(buffer)` returns the actor and its client.
/// 2. **Wire**: hand the document's `Context` (usually other clients) to `run`.
/// 3. **Run**: spawn `run` on the tokio runtime.
///
/// ```rust,ignore
/// let (actor, client) = CollectionActor::<Tour>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(tour_create).await?;
/// ```
///
/// # Implementation Details
///
/// * `store` is a `BTreeMap`, so `Find` returns documents in id order.
/// * `unique` indexes [`Document::unique_key`]; a second document with the
///   same key is refused with [`StoreError::DuplicateKey`].
/// * Updates and actions run on a clone of the stored document. The clone
///   replaces the original only when the hook succeeds and the unique index
///   accepts it, so a failed request leaves the collection untouched.
pub struct CollectionActor<T: Document> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    store: BTreeMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: Document> CollectionActor<T> {
    /// Creates a new `CollectionActor` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the mailbox capacity; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            unique: HashMap::new(),
            next_id: 1,
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let collection = collection_name::<T>();
        info!(collection, "Collection started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(collection, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(collection, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(collection, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(collection, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                CollectionRequest::Find { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|doc| doc.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(collection, ?filter, hits = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                CollectionRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(collection, %id, ?update, "Update");
                    let result = self.update(id.clone(), update, &context).await;
                    match &result {
                        Ok(_) => info!(collection, %id, "Updated"),
                        Err(e) => warn!(collection, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(collection, %id, "Delete");
                    let result = self.delete(id.clone(), &context).await;
                    match &result {
                        Ok(()) => info!(collection, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(collection, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::DeleteMany { filter, respond_to } => {
                    debug!(collection, ?filter, "DeleteMany");
                    let deleted = self.delete_many(&filter, &context).await;
                    info!(collection, deleted, size = self.store.len(), "Deleted many");
                    let _ = respond_to.send(Ok(deleted));
                }
                CollectionRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(collection, %id, ?action, "Action");
                    let result = self.action(id.clone(), action, &context).await;
                    match &result {
                        Ok(_) => info!(collection, %id, "Action ok"),
                        Err(e) => warn!(collection, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(collection, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, ctx: &T::Context) -> Result<T::Id, StoreError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut doc = T::from_create_params(id.clone(), params).map_err(document_error)?;
        doc.on_create(ctx).await.map_err(document_error)?;

        if let Some(key) = doc.unique_key() {
            if self.unique.contains_key(&key) {
                return Err(StoreError::DuplicateKey(key));
            }
            self.unique.insert(key, id.clone());
        }
        self.store.insert(id.clone(), doc);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        ctx: &T::Context,
    ) -> Result<T, StoreError> {
        let mut draft = self.draft(&id)?;
        draft.on_update(update, ctx).await.map_err(document_error)?;
        self.commit(id, draft.clone())?;
        Ok(draft)
    }

    async fn action(
        &mut self,
        id: T::Id,
        action: T::Action,
        ctx: &T::Context,
    ) -> Result<T::ActionResult, StoreError> {
        let mut draft = self.draft(&id)?;
        let result = draft
            .handle_action(action, ctx)
            .await
            .map_err(document_error)?;
        self.commit(id, draft)?;
        Ok(result)
    }

    async fn delete(&mut self, id: T::Id, ctx: &T::Context) -> Result<(), StoreError> {
        let doc = self
            .store
            .get(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        doc.on_delete(ctx).await.map_err(document_error)?;
        self.remove(&id);
        Ok(())
    }

    async fn delete_many(&mut self, filter: &T::Filter, ctx: &T::Context) -> usize {
        let matching: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, doc)| doc.matches(filter))
            .map(|(id, _)| id.clone())
            .collect();

        let mut deleted = 0;
        for id in matching {
            match self.delete(id.clone(), ctx).await {
                Ok(()) => deleted += 1,
                Err(e) => warn!(%id, error = %e, "Skipped during delete_many"),
            }
        }
        deleted
    }

    fn draft(&self, id: &T::Id) -> Result<T, StoreError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn commit(&mut self, id: T::Id, doc: T) -> Result<(), StoreError> {
        let old_key = self.store.get(&id).and_then(|current| current.unique_key());
        let new_key = doc.unique_key();

        if new_key != old_key {
            if let Some(key) = &new_key {
                if self.unique.get(key).is_some_and(|owner| *owner != id) {
                    return Err(StoreError::DuplicateKey(key.clone()));
                }
            }
            if let Some(key) = old_key {
                self.unique.remove(&key);
            }
            if let Some(key) = new_key {
                self.unique.insert(key, id.clone());
            }
        }
        self.store.insert(id, doc);
        Ok(())
    }

    fn remove(&mut self, id: &T::Id) {
        if let Some(doc) = self.store.remove(id) {
            if let Some(key) = doc.unique_key() {
                self.unique.remove(&key);
            }
        }
    }
}

fn document_error<E>(e: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::DocumentError(Box::new(e))
}

// "Order" instead of "tour_booking::model::order::Order"
fn collection_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
