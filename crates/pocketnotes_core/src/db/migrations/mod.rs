//! Table layout versions for the notes database.
//!
//! Each step is a SQL batch tagged with the `user_version` it produces. All
//! pending steps run inside one transaction, so a crash mid-upgrade leaves
//! the previous layout intact.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// `(resulting user_version, sql)`; versions strictly increase.
const STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Returns the newest layout version this binary can read and write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the layout version recorded in the file.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Upgrades `conn` to [`latest_version`]. Already-current files are untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }
    if found == supported {
        debug!("event=db_migrate module=db status=skip version={found}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}
