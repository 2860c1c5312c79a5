//! Per-record serialization of writes.
//!
//! Two edits to the same relationship never reach the store at the same time:
//! each record id owns an async lock, held for the duration of the store call.
//! Writes to different records run independently. A write future may be
//! dropped at any point; its lock entry is released either way.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use tokio::sync::{Mutex, MutexGuard};
use tracing::instrument;

use agent_pipeline_core::{Relationship, RelationshipId, UserId};

use crate::error::ClientError;
use crate::store::RecordStore;

type LockMap = HashMap<RelationshipId, Arc<Mutex<()>>>;

/// Shared handle that performs store writes one record at a time.
#[derive(Debug)]
pub struct Mutator<S> {
    store: Arc<S>,
    locks: Arc<StdMutex<LockMap>>,
}

impl<S> Clone for Mutator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            locks: Arc::clone(&self.locks),
        }
    }
}

/// A claim on one record's lock entry, removed from the map on drop once no
/// other writer holds a claim.
struct RecordPermit {
    id: RelationshipId,
    locks: Arc<StdMutex<LockMap>>,
    lock: Arc<Mutex<()>>,
}

impl RecordPermit {
    async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}

impl Drop for RecordPermit {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map, one in this permit
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            locks.remove(&self.id);
        }
    }
}

impl<S: RecordStore> Mutator<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            locks: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of records with a write queued or running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn permit(&self, id: RelationshipId) -> RecordPermit {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        RecordPermit {
            id,
            locks: Arc::clone(&self.locks),
            lock,
        }
    }

    /// Replace `record` in the store, after any earlier write to it finishes.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged; nothing is retried.
    #[instrument(skip(self, record), fields(relationship_id = %record.id))]
    pub async fn update(&self, record: &Relationship) -> Result<(), ClientError> {
        let permit = self.permit(record.id);
        let _guard = permit.lock().await;
        self.store.update_record(record.id, record).await
    }

    /// Delete `id` from the store, after any earlier write to it finishes.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    #[instrument(skip(self), fields(relationship_id = %id))]
    pub async fn delete(&self, id: RelationshipId, user: UserId) -> Result<(), ClientError> {
        let permit = self.permit(id);
        let _guard = permit.lock().await;
        self.store.delete_record(id, user).await
    }
}
