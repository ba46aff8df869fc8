//! SQLite file that backs the local key-value store.
//!
//! # Responsibility
//! - Locate, create and configure the database file.
//! - Bring the `kv_store` table layout up to the version this binary knows.
//!
//! # Invariants
//! - Table layout version is tracked via `PRAGMA user_version`.
//! - A file written by a newer binary is never opened for writing.
//! - Migrations cover the table layout only; the JSON payload stored under a
//!   key is never migrated.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use migrations::schema_version;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while preparing the notes database.
#[derive(Debug)]
pub enum DbError {
    /// The directory meant to hold the database file could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file carries a table layout from a newer release.
    SchemaTooNew { found: u32, supported: u32 },
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Whether the caller could succeed by upgrading the binary.
    pub fn is_schema_too_new(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "cannot create notes directory `{}`: {source}",
                path.display()
            ),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "notes database layout v{found} was written by a newer release (this build reads up to v{supported})"
            ),
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
