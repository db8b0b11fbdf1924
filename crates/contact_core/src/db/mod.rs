//! SQLite storage for the contacts database.
//!
//! A connection is only handed out once the `contacts` table exists and the
//! file is stamped with [`SCHEMA_VERSION`] in `PRAGMA user_version`.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory, schema_version, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open or bootstrap a contacts database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a build with a newer contacts schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "contacts database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "contacts database has schema version {found}, this build understands up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
