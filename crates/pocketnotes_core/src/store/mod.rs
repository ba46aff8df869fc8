//! Persistence boundary between in-memory state and local storage.
//!
//! # Responsibility
//! - Define the key-value storage contract (`KeyValueStorage`).
//! - Define the group-list persistence contract (`GroupStore`).
//! - Keep SQL and JSON details out of the state container.
//!
//! # Invariants
//! - The whole group list lives under a single key and is always written in
//!   full; there are no partial writes.
//! - Read paths reject a payload that cannot be read as a list at all, and
//!   drop individual groups that break model invariants. Falling back to an
//!   empty list is the caller's policy, not the store's.

use crate::db::DbError;
use crate::model::group::Group;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod group_store;
pub mod kv;

pub use group_store::{JsonGroupStore, GROUPS_KEY};
pub use kv::{MemoryKeyValueStorage, SqliteKeyValueStorage};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for storage reads/writes and payload decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Codec(serde_json::Error),
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "invalid stored payload: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage table `{table}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// String key-value storage, the local-storage analogue.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Durable storage for the full group list.
pub trait GroupStore {
    /// Loads the persisted list. An absent list is `Ok(vec![])`.
    fn load(&self) -> StoreResult<Vec<Group>>;
    /// Replaces the persisted list with `groups`.
    fn save(&self, groups: &[Group]) -> StoreResult<()>;
}
