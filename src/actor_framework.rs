use std::fmt::{Debug, Display};
use std::hash::Hash;
use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with creation hook)
// =============================================================================

/// Trait that any record must implement to be kept by a [`ResourceActor`].
///
/// The actor is an append-only log: records are created and read, never
/// patched or removed.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    /// Construct the full record from its assigned id and creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, FrameworkError>;

    /// Runs before the record is stored. Rejecting here stores nothing.
    fn on_create(&mut self) -> Result<(), FrameworkError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Record rejected: {0}")]
    Rejected(String),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped the request")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        debug!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        debug!(records = self.store.len(), "ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let id = (self.next_id_fn)();
        if self.store.contains_key(&id) {
            warn!(%id, "Generated id already taken");
            return Err(FrameworkError::DuplicateId(id.to_string()));
        }
        let mut item = T::from_create_params(id, params)?;
        item.on_create()?;
        self.store.insert(item.id().clone(), item.clone());
        Ok(item)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { params, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Count { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, FrameworkError> {
            Ok(Self { id, text: params.text })
        }

        fn on_create(&mut self) -> Result<(), FrameworkError> {
            if self.text.is_empty() {
                return Err(FrameworkError::Rejected("empty note".to_string()));
            }
            Ok(())
        }
    }

    fn counter_ids() -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_append_only_log_keeps_insertion_order() {
        let (actor, client) = ResourceActor::<Note>::new(10, counter_ids());
        tokio::spawn(actor.run());

        for text in ["first", "second", "third"] {
            client.create(NoteCreate { text: text.into() }).await.unwrap();
        }

        let notes = client.list().await.unwrap();
        let texts: Vec<_> = notes.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(notes[1].id(), "note_2");
        assert_eq!(client.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_rejected_create_stores_nothing() {
        let (actor, client) = ResourceActor::<Note>::new(10, counter_ids());
        tokio::spawn(actor.run());

        let result = client.create(NoteCreate { text: String::new() }).await;
        assert_eq!(result, Err(FrameworkError::Rejected("empty note".to_string())));
        assert_eq!(client.count().await.unwrap(), 0);
        assert_eq!(client.get("note_1".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_colliding_id_is_refused() {
        let (actor, client) = ResourceActor::<Note>::new(10, || "fixed".to_string());
        tokio::spawn(actor.run());

        client.create(NoteCreate { text: "a".into() }).await.unwrap();
        let second = client.create(NoteCreate { text: "b".into() }).await;
        assert_eq!(second, Err(FrameworkError::DuplicateId("fixed".to_string())));
        assert_eq!(client.get("fixed".to_string()).await.unwrap().unwrap().text, "a");
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new(10, counter_ids());
        drop(actor);
        assert_eq!(client.count().await, Err(FrameworkError::ActorClosed));
    }
}
