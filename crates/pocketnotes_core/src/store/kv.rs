//! Key-value storage backends.
//!
//! # Responsibility
//! - Provide a SQLite-backed `kv_store` table implementation.
//! - Provide an in-memory implementation for tests and ephemeral runs.
//!
//! # Invariants
//! - `set_item` is an upsert: one row per key.
//! - The SQLite backend refuses connections whose migrations did not create
//!   `kv_store`.

use crate::store::{KeyValueStorage, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;

/// SQLite-backed key-value storage over a migrated connection.
pub struct SqliteKeyValueStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStorage<'conn> {
    /// Constructs storage from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_kv_table(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteKeyValueStorage<'_> {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local key-value storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryKeyValueStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw value, bypassing any codec.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.items.borrow_mut().insert(key.into(), value.into());
        storage
    }
}

impl KeyValueStorage for MemoryKeyValueStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn ensure_kv_table(conn: &Connection) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_store'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(StoreError::MissingRequiredTable("kv_store"));
    }
    Ok(())
}
