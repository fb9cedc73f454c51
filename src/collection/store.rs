//! @acp:module "Persistent Collection Store"
//! @acp:summary "Keyed collection with one-time hydration and synchronous write-through"
//! @acp:domain storage
//! @acp:layer service
//!
//! # Lifecycle
//!
//! A store starts unhydrated and reads as empty. Until [`hydrate`] has run,
//! mutations change the in-memory collection but are not written: the
//! durable value has not been read yet and writing would clobber it.
//! Instead each mutation is queued. Hydration loads the durable value,
//! replays the queue on top of it, and writes the result once if anything
//! was queued. From then on every mutation writes the full collection
//! before returning.
//!
//! Storage failures never reach the caller. A failed or corrupt read
//! hydrates as empty; a failed write leaves the in-memory state in place.
//!
//! [`hydrate`]: PersistentCollectionStore::hydrate

use tracing::{debug, warn};

use super::record::{CollectionKind, CollectionRecord};
use crate::error::StorageError;
use crate::storage::Storage;

/// A mutation made before hydration, stored by its effect so replaying it
/// onto the durable value reproduces what the visitor saw.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingOp {
    Add(String),
    Remove(String),
    Clear,
}

impl PendingOp {
    fn apply(self, record: &mut CollectionRecord) {
        match self {
            PendingOp::Add(id) => {
                record.insert(id);
            }
            PendingOp::Remove(id) => {
                record.remove(&id);
            }
            PendingOp::Clear => {
                record.clear();
            }
        }
    }
}

/// @acp:summary "Collection persisted under one local-storage key"
#[derive(Debug)]
pub struct PersistentCollectionStore<S> {
    storage: S,
    record: CollectionRecord,
    hydrated: bool,
    pending: Vec<PendingOp>,
    revision: u64,
}

impl<S: Storage> PersistentCollectionStore<S> {
    /// Create an unhydrated store for `key`
    pub fn new(key: impl Into<String>, storage: S) -> Self {
        Self {
            storage,
            record: CollectionRecord::new(key),
            hydrated: false,
            pending: Vec::new(),
            revision: 0,
        }
    }

    pub fn for_kind(kind: CollectionKind, storage: S) -> Self {
        Self::new(kind.key(), storage)
    }

    pub fn key(&self) -> &str {
        self.record.name()
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Bumped on every observable change, hydration included
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current identifiers in insertion order
    pub fn items(&self) -> &[String] {
        self.record.ids()
    }

    pub fn count(&self) -> usize {
        self.record.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.record.contains(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// @acp:summary "Load the durable value once; later calls do nothing"
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        let mut record = match self.load() {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %self.key(), error = %e, "Could not load collection, starting empty");
                CollectionRecord::new(self.key())
            }
        };

        let pending = std::mem::take(&mut self.pending);
        let replay = !pending.is_empty();
        if replay {
            debug!(key = %self.key(), ops = pending.len(), "Replaying mutations made before hydration");
        }
        for op in pending {
            op.apply(&mut record);
        }

        self.record = record;
        self.revision += 1;
        if replay {
            self.persist();
        }
        self.hydrated = true;
    }

    /// Insert `id` if absent
    pub fn add(&mut self, id: impl Into<String>) {
        let id = id.into();
        let changed = self.record.insert(id.clone());
        self.commit(PendingOp::Add(id), changed);
    }

    /// Delete `id` if present
    pub fn remove(&mut self, id: &str) {
        let changed = self.record.remove(id);
        self.commit(PendingOp::Remove(id.to_string()), changed);
    }

    /// Remove `id` if present, add it otherwise. Returns whether it is
    /// present afterwards.
    pub fn toggle(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.record.contains(&id) {
            self.remove(&id);
            false
        } else {
            self.add(id);
            true
        }
    }

    pub fn clear(&mut self) {
        let changed = self.record.clear();
        self.commit(PendingOp::Clear, changed);
    }

    fn commit(&mut self, op: PendingOp, changed: bool) {
        if changed {
            self.revision += 1;
        }
        if self.hydrated {
            self.persist();
        } else {
            self.pending.push(op);
        }
    }

    fn load(&self) -> Result<CollectionRecord, StorageError> {
        match self.storage.get_item(self.key())? {
            Some(raw) => CollectionRecord::from_json(self.key(), &raw),
            None => Ok(CollectionRecord::new(self.key())),
        }
    }

    fn persist(&self) {
        match self.storage.set_item(self.key(), &self.record.to_json()) {
            Ok(()) => debug!(key = %self.key(), count = self.record.len(), "Collection written"),
            Err(e) => warn!(key = %self.key(), error = %e, "Could not write collection"),
        }
    }
}
