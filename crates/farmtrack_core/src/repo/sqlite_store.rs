//! SQLite-backed collection store.
//!
//! # Responsibility
//! - Persist records of one collection as JSON payloads in the `records`
//!   table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Rows are partitioned by `collection`; ids are unique per collection.
//! - List order is insertion order (`seq`).
//! - Read paths reject undecodable or invalid payloads instead of masking
//!   them.

use crate::db::ensure_migrated;
use crate::model::{new_record_id, RecordId};
use crate::repo::{CollectionStore, Record, RepoError, RepoResult};
use chrono::Utc;
use log::{debug, warn};
use rusqlite::{params, Connection};
use std::marker::PhantomData;

/// Store for collection `T` on a migrated connection.
pub struct SqliteStore<'conn, T> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> T>,
}

impl<'conn, T: Record> SqliteStore<'conn, T> {
    /// Wraps a connection returned by [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    ///
    /// # Errors
    /// - `Db(NotMigrated)` or `Db(UnsupportedSchemaVersion)` when the
    ///   connection's schema is not at the current revision.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_migrated(conn)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn decode(&self, id_text: &str, payload: &str) -> RepoResult<T> {
        let record: T = serde_json::from_str(payload).map_err(|err| {
            warn!(
                "event=record_decode module=repo status=error collection={} id={}",
                T::COLLECTION,
                id_text
            );
            RepoError::InvalidData(format!(
                "{} row `{id_text}` cannot be decoded: {err}",
                T::COLLECTION
            ))
        })?;
        if record.id().to_string() != id_text {
            return Err(RepoError::InvalidData(format!(
                "{} row `{id_text}` carries mismatched payload id {}",
                T::COLLECTION,
                record.id()
            )));
        }
        record.validate()?;
        Ok(record)
    }

    fn write_payload(&self, record: &T) -> RepoResult<usize> {
        let payload = serde_json::to_string(record)?;
        let changed = self.conn.execute(
            "UPDATE records
             SET payload = ?3,
                 updated_at = ?4
             WHERE collection = ?1 AND id = ?2;",
            params![
                T::COLLECTION,
                record.id().to_string(),
                payload,
                Utc::now().timestamp_millis(),
            ],
        )?;
        Ok(changed)
    }
}

impl<T: Record> CollectionStore<T> for SqliteStore<'_, T> {
    fn list(&self) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, payload
             FROM records
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([T::COLLECTION])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            let payload: String = row.get("payload")?;
            records.push(self.decode(&id_text, &payload)?);
        }
        Ok(records)
    }

    fn get(&self, id: RecordId) -> RepoResult<Option<T>> {
        let id_text = id.to_string();
        let mut stmt = self.conn.prepare(
            "SELECT payload
             FROM records
             WHERE collection = ?1 AND id = ?2;",
        )?;
        let mut rows = stmt.query(params![T::COLLECTION, id_text])?;
        if let Some(row) = rows.next()? {
            let payload: String = row.get("payload")?;
            return Ok(Some(self.decode(&id_text, &payload)?));
        }
        Ok(None)
    }

    fn create(&mut self, draft: T::Draft) -> RepoResult<T> {
        let now = Utc::now();
        let record = T::from_draft(new_record_id(), draft, now)?;
        let payload = serde_json::to_string(&record)?;
        self.conn.execute(
            "INSERT INTO records (collection, id, payload, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                T::COLLECTION,
                record.id().to_string(),
                payload,
                now.timestamp_millis(),
            ],
        )?;
        debug!(
            "event=record_create module=repo status=ok store=sqlite collection={} id={}",
            T::COLLECTION,
            record.id()
        );
        Ok(record)
    }

    fn update(&mut self, id: RecordId, patch: T::Patch) -> RepoResult<T> {
        let current = self.get(id)?.ok_or_else(|| RepoError::not_found::<T>(id))?;
        let merged = current.merged(patch, Utc::now())?;
        if self.write_payload(&merged)? == 0 {
            return Err(RepoError::not_found::<T>(id));
        }
        Ok(merged)
    }

    fn replace(&mut self, record: &T) -> RepoResult<T> {
        record.validate()?;
        if self.write_payload(record)? == 0 {
            return Err(RepoError::not_found::<T>(record.id()));
        }
        Ok(record.clone())
    }

    fn delete(&mut self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2;",
            params![T::COLLECTION, id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found::<T>(id));
        }
        debug!(
            "event=record_delete module=repo status=ok store=sqlite collection={} id={}",
            T::COLLECTION,
            id
        );
        Ok(())
    }
}
