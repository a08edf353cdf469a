//! # Store Actor
//!
//! Document collections run as tokio actors. Each collection is owned by one
//! [`CollectionActor`] task that processes requests sequentially, and the
//! rest of the program talks to it through a cloneable [`CollectionClient`].
//! The result behaves like a small document database: insert, point lookup,
//! filtered query, update, delete, filtered delete, plus typed actions, with
//! optional unique keys.
//!
//! ## Architecture Overview
//!
//! 1. **Document Layer** ([`Document`]) - the record type, its payloads, its filter and its hooks
//! 2. **Runtime Layer** ([`CollectionActor`]) - the request loop that owns the documents
//! 3. **Interface Layer** ([`CollectionClient`], [`CollectionHandle`]) - typed async access
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use store_actor::{CollectionActor, Document};
//!
//! #[derive(Clone, Debug)]
//! struct Tour {
//!     id: u32,
//!     slug: String,
//! }
//!
//! #[derive(Debug)]
//! struct TourCreate {
//!     slug: String,
//! }
//!
//! #[derive(Debug)]
//! struct TourError;
//!
//! impl std::fmt::Display for TourError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "tour error")
//!     }
//! }
//! impl std::error::Error for TourError {}
//!
//! #[async_trait]
//! impl Document for Tour {
//!     type Id = u32;
//!     type Create = TourCreate;
//!     type Update = ();
//!     type Action = ();
//!     type ActionResult = ();
//!     type Filter = String;
//!     type Context = ();
//!     type Error = TourError;
//!
//!     fn from_create_params(id: u32, params: TourCreate) -> Result<Self, TourError> {
//!         Ok(Self { id, slug: params.slug })
//!     }
//!
//!     fn matches(&self, slug: &String) -> bool {
//!         &self.slug == slug
//!     }
//!
//!     fn unique_key(&self) -> Option<String> {
//!         Some(self.slug.clone())
//!     }
//!
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TourError> {
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TourError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = CollectionActor::<Tour>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TourCreate { slug: "hanoi-1".into() }).await.unwrap();
//!     let found = client.find("hanoi-1".to_string()).await.unwrap();
//!     assert_eq!(found[0].id, id);
//!
//!     // The slug is a unique key.
//!     let duplicate = client.create(TourCreate { slug: "hanoi-1".into() }).await;
//!     assert!(duplicate.is_err());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own tokio task.
//! - Requests to one collection are processed one at a time, so a document
//!   is never observed half-updated and unique keys cannot race.
//! - Different collections run in parallel; a workflow spanning several
//!   collections is a sequence of requests, not a transaction.
//!
//! ## Testing
//!
//! [`mock::MockCollection`] answers a client's requests from a script, for
//! failure injection without a running actor.

pub mod actor;
pub mod client;
pub mod document;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use document::Document;
pub use error::StoreError;
pub use handle::CollectionHandle;
pub use message::{CollectionRequest, Response};
