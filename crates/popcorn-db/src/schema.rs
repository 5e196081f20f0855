//! Database schema setup.
//!
//! The schema is two tables and an index, created idempotently with
//! `CREATE ... IF NOT EXISTS` whenever a pool is initialized. There is no
//! version ledger.

use rusqlite::Connection;
use thiserror::Error;

const SCHEMA: &str = include_str!("schema.sql");

/// Schema setup error types
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Foreign key enforcement is unavailable on this connection")]
    ForeignKeysDisabled,
}

/// Create the `users` and `movies` tables if they are missing.
///
/// Also turns on foreign key enforcement for `conn` and verifies it took
/// effect, since SQLite silently ignores the pragma inside a transaction.
pub fn ensure_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    let enabled: i32 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
    if enabled != 1 {
        return Err(SchemaError::ForeignKeysDisabled);
    }

    conn.execute_batch(SCHEMA)?;
    tracing::debug!("Schema ready");
    Ok(())
}
