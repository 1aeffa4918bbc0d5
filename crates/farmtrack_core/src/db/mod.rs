//! SQLite bootstrap for the persistent record stores.
//!
//! All three collections share one `records` table keyed by
//! `(collection, id)`. The schema revision lives in `PRAGMA user_version`
//! and must equal [`SCHEMA_VERSION`] before any store touches the table.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
mod schema;

pub use open::{open_db, open_db_in_memory};
pub use rusqlite::Connection;
pub use schema::{ensure_migrated, schema_version, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer farmtrack build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// The connection was never bootstrapped, or only partially.
    NotMigrated { found: u32, expected: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "record schema v{found} is newer than this build supports (v{supported})"
            ),
            Self::NotMigrated { found, expected } => write!(
                f,
                "record schema is at v{found}, expected v{expected}; open the database with open_db"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
