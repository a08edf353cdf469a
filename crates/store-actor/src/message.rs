//! # Collection Messages
//!
//! Requests sent from a [`CollectionClient`](crate::CollectionClient) to its
//! [`CollectionActor`](crate::CollectionActor).

use crate::document::Document;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message type understood by a collection actor.
///
/// The variants are the operations a document database offers on a single
/// collection: insert, point lookup, filtered query, update, point delete,
/// filtered delete, plus `Action` for document-specific mutations that do
/// not fit a plain update (such as a guarded status transition).
#[derive(Debug)]
pub enum CollectionRequest<T: Document> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    DeleteMany {
        filter: T::Filter,
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
