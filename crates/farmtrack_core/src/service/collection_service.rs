//! Generic record use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for one collection over any store.
//! - Emit metadata-only log events for write operations.
//!
//! # Invariants
//! - Service APIs never bypass store validation contracts.
//! - Service layer remains storage-agnostic.

use crate::model::RecordId;
use crate::repo::{CollectionStore, ErrorKind, Record, RepoResult};
use log::{info, warn};
use std::marker::PhantomData;

/// Use-case wrapper over a [`CollectionStore`] for record kind `T`.
pub struct CollectionService<T, S> {
    store: S,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, S: CollectionStore<T>> CollectionService<T, S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the service and returns its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Snapshot of every record in store order.
    pub fn list(&self) -> RepoResult<Vec<T>> {
        self.store.list()
    }

    pub fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        self.store.get(id)
    }

    pub fn create(&mut self, draft: T::Draft) -> RepoResult<T> {
        match self.store.create(draft) {
            Ok(record) => {
                info!(
                    "event=record_create module=service status=ok collection={} id={}",
                    T::COLLECTION,
                    record.id()
                );
                Ok(record)
            }
            Err(err) => {
                log_failure("record_create", T::COLLECTION, err.kind());
                Err(err)
            }
        }
    }

    pub fn update(&mut self, id: RecordId, patch: T::Patch) -> RepoResult<T> {
        let result = self.store.update(id, patch);
        match &result {
            Ok(_) => info!(
                "event=record_update module=service status=ok collection={} id={}",
                T::COLLECTION,
                id
            ),
            Err(err) => log_failure("record_update", T::COLLECTION, err.kind()),
        }
        result
    }

    pub fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let result = self.store.delete(id);
        match &result {
            Ok(()) => info!(
                "event=record_delete module=service status=ok collection={} id={}",
                T::COLLECTION,
                id
            ),
            Err(err) => log_failure("record_delete", T::COLLECTION, err.kind()),
        }
        result
    }

    /// Deletes `id`, treating an already-missing record as a no-op.
    ///
    /// Returns whether a record was removed.
    pub fn delete_if_present(&mut self, id: RecordId) -> RepoResult<bool> {
        match self.store.delete(id) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub(crate) fn log_failure(event: &str, collection: &str, kind: ErrorKind) {
    let kind = match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::NotFound => "not_found",
        ErrorKind::Store => "store",
    };
    warn!("event={event} module=service status=error collection={collection} error_kind={kind}");
}
