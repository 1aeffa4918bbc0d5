//! Record table schema steps and version checks.
//!
//! Step `n` of [`STEPS`] upgrades the schema from `v{n}` to `v{n+1}`; steps
//! are append-only.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("sql/0001_records.sql")];

/// Schema revision this build reads and writes.
pub const SCHEMA_VERSION: u32 = STEPS.len() as u32;

/// Revision recorded in the connection's `user_version` pragma.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Succeeds only when the connection is at exactly [`SCHEMA_VERSION`].
pub fn ensure_migrated(conn: &Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found < SCHEMA_VERSION {
        return Err(DbError::NotMigrated {
            found,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(())
}

/// Runs the pending steps in one transaction, then re-checks the result.
pub(super) fn upgrade(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        for (version, sql) in (1u32..).zip(STEPS).skip(found as usize) {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
            info!("event=db_migrate module=db status=ok from={found} to={version}");
        }
        tx.commit()?;
    }

    ensure_migrated(conn)
}

#[cfg(test)]
mod tests {
    use super::{ensure_migrated, schema_version, upgrade, SCHEMA_VERSION};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_is_not_migrated() {
        let conn = Connection::open_in_memory().unwrap();
        match ensure_migrated(&conn) {
            Err(DbError::NotMigrated { found, expected }) => {
                assert_eq!(found, 0);
                assert_eq!(expected, SCHEMA_VERSION);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn upgrade_is_repeatable() {
        let mut conn = Connection::open_in_memory().unwrap();
        upgrade(&mut conn).unwrap();
        upgrade(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        ensure_migrated(&conn).unwrap();
    }
}
