//! # Core Actor Framework
//!
//! Generic building blocks for the actor system.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all resource types must implement.
//! - [`ResourceActor`]: The generic actor that manages entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).
//!
//! # Architecture Note
//! Each `ResourceActor` owns its store outright and processes messages
//! sequentially in its own task, so no `Mutex` or `RwLock` guards the
//! entities: exclusive ownership within the task is the synchronization.
//! Every individual entity mutation is one message, applied whole; readers
//! never observe a half-applied update.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Trait that any resource entity must implement to be managed by
/// [`ResourceActor`].
///
/// Associated types enforce payload safety: a `Courier` actor cannot be sent
/// an `OrderCreate`, the compiler rejects it. Each entity also declares its
/// own error type (one enum per actor), which the framework carries across
/// the channel boundary inside [`FrameworkError::Entity`].
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    /// `Ord` gives `List` a deterministic order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance (DTO).
    type CreateParams: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type UpdateParams: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Bind`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The error type for this entity; one enum covers the whole actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the generated ID and the payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Apply an update request to the entity in place.
    fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), Self::Error>;

    /// Handle a custom resource-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    fn entity<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        FrameworkError::Entity(Box::new(e))
    }
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to CRUD plus `List` (store-wide enumeration) and
/// `Action` (resource-specific logic that does not fit the CRUD model).
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T>,
    },
    #[allow(dead_code)]
    Delete { id: T::Id, respond_to: Response<()> },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// The generic actor that manages a collection of entities.
///
/// This struct is the "server" half: it owns the state (`store`) and the
/// receiver end of the channel. IDs come from an injected generator so each
/// domain keeps its own format (`ORD_0001`, `COU_001`, …).
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes (i.e., until every client clone has been dropped).
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Courier" instead of
        // "courier_dispatch::model::courier::Courier").
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    // HashMap iteration order is arbitrary; callers get a
                    // stable id-sorted view.
                    let mut keyed: Vec<(&T::Id, &T)> = self.store.iter().collect();
                    keyed.sort_by(|a, b| a.0.cmp(b.0));
                    let items: Vec<T> = keyed.into_iter().map(|(_, v)| v.clone()).collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update) {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::entity(e)));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action).map_err(FrameworkError::entity);
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap and clones can be shared across
/// tasks freely.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
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

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update {
                id,
                update,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    #[allow(dead_code)]
    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
