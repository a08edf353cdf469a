//! # Document Trait
//!
//! The `Document` trait is the contract every stored record (orders, tours,
//! history entries, revenue reports, …) implements so that the generic
//! [`CollectionActor`](crate::CollectionActor) can own a collection of it.
//!
//! Associated types keep every request strongly typed: an order collection
//! only accepts an order creation payload, an order filter, and order actions.
//!
//! # Provided Methods (Hooks)
//! - [`Document::unique_key`] declares a secondary unique index (default: none).
//! - [`Document::on_create`] validates a freshly built document.
//! - [`Document::on_delete`] can veto a removal.
//!
//! Hooks receive the collection's `Context`, injected when the actor starts.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any stored document must implement to be managed by a
/// [`CollectionActor`](crate::CollectionActor).
///
/// # Async & Context
/// Hooks are async so they can consult other collections through their
/// clients. The `Context` type carries those clients; it is handed to
/// [`CollectionActor::run`](crate::CollectionActor::run) instead of the
/// constructor, which lets collections that depend on each other be created
/// in any order.
#[async_trait]
pub trait Document: Clone + Send + Sync + 'static {
    /// Primary key. Ordered so queries return documents in id order, and
    /// convertible from `u32` for automatic id allocation.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new document.
    type Create: Send + Sync + Debug;

    /// Payload required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (e.g. a status transition).
    type Action: Send + Sync + Debug;

    /// Result returned by [`Document::handle_action`].
    type ActionResult: Send + Sync + Debug;

    /// Query used by `find` and `delete_many`.
    type Filter: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per collection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the document from the allocated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this document satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Value that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Called after construction and before the document is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. Runs on a copy; the copy is committed only on `Ok`.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called before the document is removed. An error keeps it stored.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a document-specific action. Runs on a copy like `on_update`.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
