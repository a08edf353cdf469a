//! # Mock Collections & Testing Guide
//!
//! [`MockCollection<T>`] hands out a real [`CollectionClient<T>`] whose
//! requests are answered from a queue of scripted expectations instead of a
//! running [`CollectionActor`](crate::CollectionActor). Use it to drive code
//! that sits *on top of* clients (engines, sweepers, domain clients) into
//! paths that are awkward to reach with real collections, such as a storage
//! failure halfway through a multi-step workflow.
//!
//! ## When to use Mocks vs Real Collections
//!
//! | Feature | MockCollection | Real CollectionActor |
//! |---------|----------------|----------------------|
//! | **State** | None, scripted replies | Real documents |
//! | **Ordering** | Strict FIFO of expectations | Whatever the caller does |
//! | **Error Injection** | `return_err(...)` | Needs a document that refuses |
//! | **Use Case** | Failure paths, call-sequence checks | Behaviour and invariants |
//!
//! ## Fluent API
//!
//! ```rust,ignore
//! let mut tours = MockCollection::<Tour>::new();
//! tours.expect_find().return_ok(vec![hanoi_tour()]);
//! tours.expect_get(TourId(9)).return_err(StoreError::ActorClosed);
//!
//! let client = TourClient::new(tours.client());
//! // ... exercise code ...
//! tours.verify(); // every expectation consumed, no mismatched request
//! ```
//!
//! Requests are matched in order. A request that does not match the next
//! expectation (wrong kind or wrong id) gets no reply, so the caller sees
//! [`StoreError::ActorDropped`], and `verify` panics.
//!
//! ## Low-level helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver, and the
//! `expect_*` functions pop the next request so a test can inspect the
//! payload and answer by hand.

use crate::client::CollectionClient;
use crate::document::Document;
use crate::error::StoreError;
use crate::message::CollectionRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Document> {
    Create {
        response: Result<T::Id, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Find {
        response: Result<Vec<T>, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), StoreError>,
    },
    DeleteMany {
        response: Result<usize, StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
}

struct Script<T: Document> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type SharedScript<T> = Arc<Mutex<Script<T>>>;

/// A collection client backed by scripted replies.
pub struct MockCollection<T: Document> {
    client: CollectionClient<T>,
    script: SharedScript<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockCollection<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let script: SharedScript<T> = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let worker_script = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut script = worker_script.lock().unwrap();
                let expectation = script.expectations.pop_front();
                if let Some(mismatch) = answer(request, expectation) {
                    script.mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            script: self.script.clone(),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_find(&mut self) -> FindExpectationBuilder<T> {
        FindExpectationBuilder {
            script: self.script.clone(),
        }
    }

    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_delete_many(&mut self) -> DeleteManyExpectationBuilder<T> {
        DeleteManyExpectationBuilder {
            script: self.script.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            script: self.script.clone(),
        }
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", script.mismatches);
        }
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
    }
}

// One builder per request kind: `XxxExpectationBuilder` with `return_ok` / `return_err`.
macro_rules! expectation_builder {
    ($variant:ident, $reply:ty) => {
        paste::paste! {
            #[doc = "Builder for `" $variant "` expectations."]
            pub struct [<$variant ExpectationBuilder>]<T: Document> {
                script: SharedScript<T>,
            }

            impl<T: Document> [<$variant ExpectationBuilder>]<T> {
                pub fn return_ok(self, value: $reply) {
                    self.push(Ok(value));
                }

                pub fn return_err(self, error: StoreError) {
                    self.push(Err(error));
                }

                fn push(self, response: Result<$reply, StoreError>) {
                    let mut script = self.script.lock().unwrap();
                    script.expectations.push_back(Expectation::$variant { response });
                }
            }
        }
    };
    ($variant:ident, $reply:ty, by_id) => {
        paste::paste! {
            #[doc = "Builder for `" $variant "` expectations on one id."]
            pub struct [<$variant ExpectationBuilder>]<T: Document> {
                id: T::Id,
                script: SharedScript<T>,
            }

            impl<T: Document> [<$variant ExpectationBuilder>]<T> {
                pub fn return_ok(self, value: $reply) {
                    self.push(Ok(value));
                }

                pub fn return_err(self, error: StoreError) {
                    self.push(Err(error));
                }

                fn push(self, response: Result<$reply, StoreError>) {
                    let mut script = self.script.lock().unwrap();
                    script.expectations.push_back(Expectation::$variant {
                        id: self.id,
                        response,
                    });
                }
            }
        }
    };
}

expectation_builder!(Create, T::Id);
expectation_builder!(Get, Option<T>, by_id);
expectation_builder!(Find, Vec<T>);
expectation_builder!(Update, T, by_id);
expectation_builder!(Delete, (), by_id);
expectation_builder!(DeleteMany, usize);
expectation_builder!(Action, T::ActionResult, by_id);

// Replies to `request` when it matches `expectation`; otherwise drops the
// reply channel and describes the mismatch.
fn answer<T: Document>(
    request: CollectionRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Option<String> {
    match (request, expectation) {
        (CollectionRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (
            CollectionRequest::Get { id, respond_to },
            Some(Expectation::Get {
                id: expected,
                response,
            }),
        ) => reply_if_same(id, expected, respond_to, response, "Get"),
        (CollectionRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
            let _ = respond_to.send(response);
            None
        }
        (
            CollectionRequest::Update { id, respond_to, .. },
            Some(Expectation::Update {
                id: expected,
                response,
            }),
        ) => reply_if_same(id, expected, respond_to, response, "Update"),
        (
            CollectionRequest::Delete { id, respond_to },
            Some(Expectation::Delete {
                id: expected,
                response,
            }),
        ) => reply_if_same(id, expected, respond_to, response, "Delete"),
        (
            CollectionRequest::DeleteMany { respond_to, .. },
            Some(Expectation::DeleteMany { response }),
        ) => {
            let _ = respond_to.send(response);
            None
        }
        (
            CollectionRequest::Action { id, respond_to, .. },
            Some(Expectation::Action {
                id: expected,
                response,
            }),
        ) => reply_if_same(id, expected, respond_to, response, "Action"),
        (request, None) => Some(format!("{} with no expectation left", kind(&request))),
        (request, Some(_)) => Some(format!("{} did not match the next expectation", kind(&request))),
    }
}

fn reply_if_same<Id: PartialEq + std::fmt::Display, R>(
    id: Id,
    expected: Id,
    respond_to: oneshot::Sender<Result<R, StoreError>>,
    response: Result<R, StoreError>,
    kind: &str,
) -> Option<String> {
    if id == expected {
        let _ = respond_to.send(response);
        None
    } else {
        Some(format!("{kind} for {id}, expected {expected}"))
    }
}

fn kind<T: Document>(request: &CollectionRequest<T>) -> &'static str {
    match request {
        CollectionRequest::Create { .. } => "Create",
        CollectionRequest::Get { .. } => "Get",
        CollectionRequest::Find { .. } => "Find",
        CollectionRequest::Update { .. } => "Update",
        CollectionRequest::Delete { .. } => "Delete",
        CollectionRequest::DeleteMany { .. } => "DeleteMany",
        CollectionRequest::Action { .. } => "Action",
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw receiver its requests arrive on.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Pops the next request if it is a Create.
pub async fn expect_create<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a Find.
pub async fn expect_find<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Find { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is an Action.
pub async fn expect_action<T: Document>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Note error")]
    struct NoteError;

    #[async_trait]
    impl Document for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Filter = ();
        type Context = ();
        type Error = NoteError;

        fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
            Ok(Self {
                id,
                text: params.text,
            })
        }

        fn matches(&self, _filter: &()) -> bool {
            true
        }

        async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), NoteError> {
            Ok(())
        }

        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), NoteError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_sees_create_payload() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(NoteCreate {
                    text: "hello".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.text, "hello");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let mut mock = MockCollection::<Note>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Note {
            id: 1,
            text: "hello".to_string(),
        }));
        mock.expect_delete_many().return_err(StoreError::ActorClosed);

        let client = mock.client();
        let id = client
            .create(NoteCreate {
                text: "hello".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().text, "hello");
        assert!(matches!(
            client.delete_many(()).await,
            Err(StoreError::ActorClosed)
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_wrong_id_is_reported() {
        let mut mock = MockCollection::<Note>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }
}
