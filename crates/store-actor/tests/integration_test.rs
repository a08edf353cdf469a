use async_trait::async_trait;
use store_actor::{CollectionActor, Document, StoreError};

// --- Test Document ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    code: String,
    seats: u32,
    closed: bool,
}

#[derive(Debug)]
struct TicketCreate {
    code: String,
    seats: u32,
}

#[derive(Debug)]
struct TicketUpdate {
    code: Option<String>,
    seats: Option<u32>,
}

#[derive(Debug)]
enum TicketAction {
    Close,
}

#[derive(Debug)]
enum TicketFilter {
    All,
    Open,
    AtLeastSeats(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("A ticket needs at least one seat")]
    NoSeats,
    #[error("Ticket already closed")]
    AlreadyClosed,
    #[error("Closed tickets cannot be deleted")]
    Closed,
}

#[async_trait]
impl Document for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = u32;
    type Filter = TicketFilter;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
        Ok(Self {
            id,
            code: params.code,
            seats: params.seats,
            closed: false,
        })
    }

    fn matches(&self, filter: &TicketFilter) -> bool {
        match filter {
            TicketFilter::All => true,
            TicketFilter::Open => !self.closed,
            TicketFilter::AtLeastSeats(n) => self.seats >= *n,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.code.clone())
    }

    async fn on_create(&mut self, _ctx: &()) -> Result<(), TicketError> {
        if self.seats == 0 {
            return Err(TicketError::NoSeats);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), TicketError> {
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(seats) = update.seats {
            self.seats = seats;
            if seats == 0 {
                return Err(TicketError::NoSeats);
            }
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), TicketError> {
        if self.closed {
            return Err(TicketError::Closed);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<u32, TicketError> {
        match action {
            TicketAction::Close => {
                if self.closed {
                    return Err(TicketError::AlreadyClosed);
                }
                self.closed = true;
                Ok(self.seats)
            }
        }
    }
}

fn ticket(code: &str, seats: u32) -> TicketCreate {
    TicketCreate {
        code: code.to_string(),
        seats,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_collection_full_lifecycle() {
    let (actor, client) = CollectionActor::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id: u32 = client.create(ticket("A-1", 4)).await.unwrap();
    assert_eq!(id, 1);

    let seats = client.perform_action(id, TicketAction::Close).await.unwrap();
    assert_eq!(seats, 4);
    let stored: Ticket = client.get(id).await.unwrap().unwrap();
    assert!(stored.closed);

    let again = client.perform_action(id, TicketAction::Close).await;
    let err = again.unwrap_err().downcast_document::<TicketError>().unwrap();
    assert_eq!(err, TicketError::AlreadyClosed);

    let renamed = client
        .update(
            id,
            TicketUpdate {
                code: Some("A-2".into()),
                seats: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.code, "A-2");

    // on_delete vetoes closed tickets.
    assert!(client.delete(id).await.is_err());
    assert!(client.get(id).await.unwrap().is_some());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_find_returns_matches_in_id_order() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    for (code, seats) in [("c", 2), ("a", 8), ("b", 5)] {
        client.create(ticket(code, seats)).await.unwrap();
    }

    let big: Vec<String> = client
        .find(TicketFilter::AtLeastSeats(5))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.code)
        .collect();
    assert_eq!(big, vec!["a", "b"]);

    let all = client.find(TicketFilter::All).await.unwrap();
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_unique_key_rejects_duplicates() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    client.create(ticket("A-1", 1)).await.unwrap();
    let second = client.create(ticket("A-1", 3)).await;
    assert!(matches!(second, Err(StoreError::DuplicateKey(key)) if key == "A-1"));
    assert_eq!(client.find(TicketFilter::All).await.unwrap().len(), 1);

    // Renaming onto a taken key is refused too.
    let other = client.create(ticket("B-1", 1)).await.unwrap();
    let clash = client
        .update(
            other,
            TicketUpdate {
                code: Some("A-1".into()),
                seats: None,
            },
        )
        .await;
    assert!(matches!(clash, Err(StoreError::DuplicateKey(_))));
    assert_eq!(client.get(other).await.unwrap().unwrap().code, "B-1");

    // Once the owner is deleted the key is free again.
    client.delete(1).await.unwrap();
    assert!(client.create(ticket("A-1", 2)).await.is_ok());
}

#[tokio::test]
async fn test_failed_update_leaves_document_untouched() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(ticket("A-1", 6)).await.unwrap();
    let result = client
        .update(
            id,
            TicketUpdate {
                code: Some("changed".into()),
                seats: Some(0),
            },
        )
        .await;
    assert!(result.is_err());

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.code, "A-1");
    assert_eq!(stored.seats, 6);
}

#[tokio::test]
async fn test_create_validation_and_missing_documents() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let rejected = client.create(ticket("empty", 0)).await;
    let err = rejected.unwrap_err().downcast_document::<TicketError>().unwrap();
    assert_eq!(err, TicketError::NoSeats);

    assert!(client.get(42).await.unwrap().is_none());
    assert!(matches!(client.delete(42).await, Err(StoreError::NotFound(id)) if id == "42"));
    assert!(matches!(
        client.perform_action(42, TicketAction::Close).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_many_skips_vetoed_documents() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(ticket("a", 1)).await.unwrap();
    client.create(ticket("b", 1)).await.unwrap();
    client.create(ticket("c", 1)).await.unwrap();
    client.perform_action(first, TicketAction::Close).await.unwrap();

    let deleted = client.delete_many(TicketFilter::All).await.unwrap();
    assert_eq!(deleted, 2);

    let left = client.find(TicketFilter::All).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, first);
    assert_eq!(client.delete_many(TicketFilter::Open).await.unwrap(), 0);
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = CollectionActor::<Ticket>::new(10);
    drop(actor);

    assert!(matches!(
        client.get(1).await,
        Err(StoreError::ActorClosed)
    ));
}
