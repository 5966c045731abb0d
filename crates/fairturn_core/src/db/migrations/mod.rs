//! Schema bootstrap for the key-value table.
//!
//! # Invariants
//! - The applied schema version is mirrored to `PRAGMA user_version`.
//! - Databases stamped with a newer version are refused, never downgraded.

use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::Connection;

const KV_SCHEMA_VERSION: u32 = 1;
const KV_SCHEMA_SQL: &str = include_str!("0001_init.sql");

/// Returns the schema version this binary writes.
pub fn latest_version() -> u32 {
    KV_SCHEMA_VERSION
}

/// Creates the `kv_entries` table on a fresh database.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    match db_version {
        KV_SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(KV_SCHEMA_SQL)?;
            tx.execute_batch(&format!("PRAGMA user_version = {KV_SCHEMA_VERSION};"))?;
            tx.commit()?;
            debug!("event=db_migrate module=db status=ok to_version={KV_SCHEMA_VERSION}");
            Ok(())
        }
        newer => Err(DbError::UnsupportedSchemaVersion {
            db_version: newer,
            latest_supported: KV_SCHEMA_VERSION,
        }),
    }
}
