//! In-memory collection store.
//!
//! # Invariants
//! - Records keep insertion order.
//! - Every instance is independent; dropping it discards its records.

use crate::model::{new_record_id, RecordId};
use crate::repo::{CollectionStore, Record, RepoError, RepoResult};
use chrono::Utc;
use log::debug;

/// Vec-backed store owning one collection.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    records: Vec<T>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from existing records after validating each one.
    pub fn with_records(records: Vec<T>) -> RepoResult<Self> {
        for record in &records {
            record.validate()?;
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: RecordId) -> RepoResult<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| RepoError::not_found::<T>(id))
    }
}

impl<T: Record> CollectionStore<T> for MemoryStore<T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        Ok(self.records.iter().find(|record| record.id() == id).cloned())
    }

    fn create(&mut self, draft: T::Draft) -> RepoResult<T> {
        let record = T::from_draft(new_record_id(), draft, Utc::now())?;
        self.records.push(record.clone());
        debug!(
            "event=record_create module=repo status=ok store=memory collection={} id={}",
            T::COLLECTION,
            record.id()
        );
        Ok(record)
    }

    fn update(&mut self, id: RecordId, patch: T::Patch) -> RepoResult<T> {
        let index = self.position(id)?;
        let merged = self.records[index].merged(patch, Utc::now())?;
        self.records[index] = merged.clone();
        Ok(merged)
    }

    fn replace(&mut self, record: &T) -> RepoResult<T> {
        record.validate()?;
        let index = self.position(record.id())?;
        self.records[index] = record.clone();
        Ok(record.clone())
    }

    fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let index = self.position(id)?;
        self.records.remove(index);
        debug!(
            "event=record_delete module=repo status=ok store=memory collection={} id={}",
            T::COLLECTION,
            id
        );
        Ok(())
    }
}
