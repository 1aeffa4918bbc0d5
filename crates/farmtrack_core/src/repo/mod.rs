//! Collection store contracts and implementations.
//!
//! # Responsibility
//! - Define the CRUD contract every record collection is accessed through.
//! - Provide an in-memory store and a SQLite-backed store.
//!
//! # Invariants
//! - Write paths validate the full record before it is stored.
//! - Missing identifiers surface as `NotFound`, distinct from validation and
//!   storage failures.
//! - Stores are explicitly constructed values; there is no process-wide
//!   collection state.

pub mod memory_store;
pub mod records;
pub mod sqlite_store;

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::RecordId;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for record persistence and lookup.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound {
        collection: &'static str,
        id: RecordId,
    },
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
}

/// Coarse error class used by callers to pick a reaction: fix input
/// (`Validation`), ignore or report (`NotFound`), retry (`Store`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Store,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Db(_) | Self::Serialization(_) | Self::InvalidData(_) => ErrorKind::Store,
        }
    }

    /// Validation messages, when this is a validation failure.
    pub fn validation_messages(&self) -> Option<&[String]> {
        match self {
            Self::Validation(err) => Some(err.messages()),
            _ => None,
        }
    }

    pub(crate) fn not_found<T: Record>(id: RecordId) -> Self {
        Self::NotFound {
            collection: T::COLLECTION,
            id,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "record serialization failed: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// A record kind that can live in a collection store.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Fields accepted on create.
    type Draft;
    /// Fields accepted on partial update.
    type Patch;

    /// Collection name used for storage partitioning and diagnostics.
    const COLLECTION: &'static str;

    fn id(&self) -> RecordId;

    fn from_draft(
        id: RecordId,
        draft: Self::Draft,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError>;

    fn merged(&self, patch: Self::Patch, now: DateTime<Utc>) -> Result<Self, ValidationError>;

    fn validate(&self) -> Result<(), ValidationError>;
}

/// CRUD contract over one record collection.
///
/// `list` returns copies in insertion order; callers never hold references
/// into the store.
pub trait CollectionStore<T: Record> {
    fn list(&self) -> RepoResult<Vec<T>>;

    fn get(&self, id: RecordId) -> RepoResult<Option<T>>;

    /// Assigns a fresh identifier and creation timestamp.
    fn create(&mut self, draft: T::Draft) -> RepoResult<T>;

    /// Merges `patch` into the stored record. `NotFound` if `id` is absent.
    fn update(&mut self, id: RecordId, patch: T::Patch) -> RepoResult<T>;

    /// Overwrites the stored record with the same id. `NotFound` if absent.
    fn replace(&mut self, record: &T) -> RepoResult<T>;

    /// Removes the record. `NotFound` if `id` is absent.
    fn delete(&mut self, id: RecordId) -> RepoResult<()>;
}
