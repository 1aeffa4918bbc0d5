use farmtrack_core::db::{
    ensure_migrated, open_db, open_db_in_memory, schema_version, DbError, SCHEMA_VERSION,
};
use farmtrack_core::model::crop::Crop;
use farmtrack_core::{ErrorKind, RepoError, SqliteStore};
use rusqlite::Connection;

#[test]
fn in_memory_database_starts_at_current_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    ensure_migrated(&conn).unwrap();
    assert_records_table(&conn);
}

#[test]
fn reopening_a_farm_file_keeps_its_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("farmtrack.sqlite3");

    drop(open_db(&path).unwrap());
    let reopened = open_db(&path).unwrap();

    assert_eq!(schema_version(&reopened).unwrap(), SCHEMA_VERSION);
    assert_records_table(&reopened);
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 999u32)
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_refuses_unmigrated_connection_with_schema_error() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteStore::<Crop>::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::Db(DbError::NotMigrated { found: 0, .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Store);
}

fn assert_records_table(conn: &Connection) {
    let exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'records');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists, "records table is missing");
}
