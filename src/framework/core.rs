//! # Core Store Framework
//!
//! This module defines the generic building blocks for resource storage.
//!
//! ## Key Types
//!
//! - [`Resource`]: The trait that all stored resource types must implement.
//! - [`ResourceActor`]: The single-owner task that holds records and the secondary index.
//! - [`StoreClient`]: The cloneable handle request tasks use to talk to the actor.
//! - [`ResourceStore`]: The storage contract the service layer is written against.
//! - [`StoreError`]: Failures reaching the backing store.

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource must implement to be kept by a [`ResourceActor`].
///
/// # Architecture Note
/// The actor only needs three things from a resource: its identity (which may be
/// absent before the first save), a way to stamp a freshly assigned identity onto
/// it, and the key under which the secondary index groups it. Everything else
/// about the resource is opaque to the store.
pub trait Resource: Clone + Send + Sync + Debug + 'static {
    /// The unique identifier for this resource (e.g., u64, String).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The identity, or `None` if the resource has never been saved.
    fn id(&self) -> Option<Self::Id>;

    /// Returns the resource carrying `id`.
    fn with_id(self, id: Self::Id) -> Self;

    /// The secondary index key, or `None` if the resource is not indexed.
    ///
    /// Keys are compared verbatim, so implementations return them already normalized.
    fn index_key(&self) -> Option<String>;
}

// =============================================================================
// 2. THE MESSAGES & ERRORS
// =============================================================================

/// Errors raised when the backing store cannot be reached.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
}

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor to request operations.
///
/// Each variant maps to one operation of the [`ResourceStore`] contract. Reads and
/// writes travel through the same queue, so a reader always observes either the
/// state before a mutation or the state after it.
#[derive(Debug)]
pub enum StoreRequest<T: Resource> {
    Save {
        resource: T,
        respond_to: Response<T>,
    },
    Replace {
        resource: T,
        respond_to: Response<Option<T>>,
    },
    FindById {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    FindByIndex {
        key: String,
        respond_to: Response<Vec<T>>,
    },
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    DeleteById {
        id: T::Id,
        respond_to: Response<bool>,
    },
    DeleteAll {
        respond_to: Response<usize>,
    },
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE ACTOR SERVER
// =============================================================================

/// The actor that owns every record of one resource type.
///
/// # Architecture Note
/// The primary map, the insertion order and the secondary index live together in
/// this struct and are only ever touched from inside [`ResourceActor::run`]. A
/// mutation updates all three before the next message is looked at, so no reader
/// can see an id in the index that is missing from the primary map (or the other
/// way around). There is no `Mutex` anywhere: exclusive ownership of the state
/// within one task is what serializes writers.
pub struct ResourceActor<T: Resource> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    index: HashMap<String, Vec<T::Id>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Resource> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: HashMap::new(),
            order: Vec::new(),
            index: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Course" instead of "course_catalog::model::course::Course")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Save {
                    resource,
                    respond_to,
                } => {
                    let saved = self.save(resource);
                    debug!(entity_type, id = ?saved.id(), size = self.records.len(), "Save");
                    let _ = respond_to.send(Ok(saved));
                }
                StoreRequest::Replace {
                    resource,
                    respond_to,
                } => {
                    let replaced = self.replace(resource);
                    debug!(entity_type, replaced = replaced.is_some(), "Replace");
                    let _ = respond_to.send(Ok(replaced));
                }
                StoreRequest::FindById { id, respond_to } => {
                    let item = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "FindById");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::FindByIndex { key, respond_to } => {
                    let items = self.find_by_index(&key);
                    debug!(entity_type, %key, matches = items.len(), "FindByIndex");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::FindAll { respond_to } => {
                    let items = self.find_all();
                    debug!(entity_type, size = items.len(), "FindAll");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::DeleteById { id, respond_to } => {
                    let removed = self.delete_by_id(&id);
                    debug!(entity_type, %id, removed, size = self.records.len(), "DeleteById");
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::DeleteAll { respond_to } => {
                    let removed = self.delete_all();
                    info!(entity_type, removed, "DeleteAll");
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.records.len()));
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn save(&mut self, resource: T) -> T {
        let id = match resource.id() {
            Some(id) => id,
            None => self.fresh_id(),
        };
        let stored = resource.with_id(id.clone());
        self.put(id, stored.clone());
        stored
    }

    fn replace(&mut self, resource: T) -> Option<T> {
        let id = resource.id()?;
        if !self.records.contains_key(&id) {
            return None;
        }
        self.put(id, resource.clone());
        Some(resource)
    }

    /// Writes the record and keeps the order list and index in step with it.
    fn put(&mut self, id: T::Id, stored: T) {
        let new_key = stored.index_key();
        match self.records.insert(id.clone(), stored) {
            Some(previous) => {
                let old_key = previous.index_key();
                if old_key != new_key {
                    self.unindex(old_key.as_deref(), &id);
                    self.reindex(new_key, &id);
                }
            }
            None => {
                self.order.push(id.clone());
                self.reindex(new_key, &id);
            }
        }
    }

    fn fresh_id(&self) -> T::Id {
        loop {
            let id = (self.next_id_fn)();
            if !self.records.contains_key(&id) {
                return id;
            }
        }
    }

    fn reindex(&mut self, key: Option<String>, id: &T::Id) {
        if let Some(key) = key {
            self.index.entry(key).or_default().push(id.clone());
        }
    }

    fn unindex(&mut self, key: Option<&str>, id: &T::Id) {
        let Some(key) = key else { return };
        if let Some(bucket) = self.index.get_mut(key) {
            bucket.retain(|existing| existing != id);
            if bucket.is_empty() {
                self.index.remove(key);
            }
        }
    }

    fn find_by_index(&self, key: &str) -> Vec<T> {
        self.index
            .get(key)
            .map(|ids| ids.iter().filter_map(|id| self.records.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    fn find_all(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    fn delete_by_id(&mut self, id: &T::Id) -> bool {
        match self.records.remove(id) {
            Some(removed) => {
                self.order.retain(|existing| existing != id);
                self.unindex(removed.index_key().as_deref(), id);
                true
            }
            None => false,
        }
    }

    fn delete_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        self.order.clear();
        self.index.clear();
        removed
    }
}

// =============================================================================
// 4. THE STORE CONTRACT & CLIENT
// =============================================================================

/// Durable keyed storage with a secondary index.
///
/// Absence is never an error: lookups return `None` or an empty `Vec`, and deleting
/// a missing id succeeds. The only failure is [`StoreError`], raised when the backing
/// medium cannot be reached.
#[async_trait]
pub trait ResourceStore<T: Resource>: Send + Sync {
    /// Assigns an id if absent, otherwise overwrites the record with that id.
    async fn save(&self, resource: T) -> Result<T, StoreError>;

    /// Overwrites an existing record; returns `None` without writing if the id is unknown.
    async fn replace(&self, resource: T) -> Result<Option<T>, StoreError>;

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// All records indexed under `key`, in insertion order.
    async fn find_by_index(&self, key: String) -> Result<Vec<T>, StoreError>;

    /// Full scan in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    /// Removes the record and its index entry; `false` if nothing was stored.
    async fn delete_by_id(&self, id: T::Id) -> Result<bool, StoreError>;

    /// Clears records and index, returning how many records were removed.
    async fn delete_all(&self) -> Result<usize, StoreError>;

    async fn count(&self) -> Result<usize, StoreError>;
}

/// A type-safe handle for talking to a [`ResourceActor`].
#[derive(Clone)]
pub struct StoreClient<T: Resource> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Resource> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T> + Send,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for StoreClient<T> {
    async fn save(&self, resource: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Save {
            resource,
            respond_to,
        })
        .await
    }

    async fn replace(&self, resource: T) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Replace {
            resource,
            respond_to,
        })
        .await
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindById { id, respond_to })
            .await
    }

    async fn find_by_index(&self, key: String) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindByIndex { key, respond_to })
            .await
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindAll { respond_to })
            .await
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<bool, StoreError> {
        self.request(|respond_to| StoreRequest::DeleteById { id, respond_to })
            .await
    }

    async fn delete_all(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::DeleteAll { respond_to })
            .await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.request(|respond_to| StoreRequest::Count { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
