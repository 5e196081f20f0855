//! Database connection pool management.
//!
//! This module provides connection pooling for SQLite using r2d2.
//! It handles pool initialization, connection customization, and schema setup.

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use popcorn_common::{Error, Result};

use crate::schema;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const POOL_SIZE: u32 = 4;

/// Initialize a new database pool with the given file path.
///
/// This function will:
/// - Create the SQLite database file if it doesn't exist
/// - Enable foreign key constraints on all connections
/// - Create the `users` and `movies` tables if missing
///
/// # Example
///
/// ```no_run
/// use popcorn_db::pool::init_pool;
///
/// let pool = init_pool("movies.sqlite").unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    let manager = SqliteConnectionManager::file(db_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    build(manager, "Failed to create connection pool")
}

/// Initialize an in-memory database pool for testing.
///
/// Each call creates a uniquely-named shared-cache in-memory database, so
/// parallel tests never see each other's rows while all connections within
/// one pool share the same data.
///
/// ```
/// use popcorn_db::pool::init_memory_pool;
///
/// let pool = init_memory_pool().unwrap();
/// let conn = pool.get().unwrap();
/// ```
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:popcorn_mem_{n}?mode=memory&cache=shared");

    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    build(manager, "Failed to create in-memory pool")
}

fn build(manager: SqliteConnectionManager, context: &str) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(POOL_SIZE)
        .build(manager)
        .map_err(|e| Error::database(format!("{context}: {e}")))?;

    let conn = get_conn(&pool)?;
    schema::ensure_schema(&conn)
        .map_err(|e| Error::database(format!("Failed to set up schema: {e}")))?;

    Ok(pool)
}

/// Get a connection from the pool.
///
/// Convenience wrapper around `pool.get()` that converts the r2d2 error into
/// the common error type.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::internal(format!("Failed to get connection from pool: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), POOL_SIZE);
    }

    #[test]
    fn test_exhausted_pool_is_internal_error() {
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(std::time::Duration::from_millis(50))
            .build(SqliteConnectionManager::memory())
            .unwrap();
        let _held = get_conn(&pool).unwrap();

        let err = get_conn(&pool).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(err.to_string().contains("Failed to get connection from pool"));
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_pool_shares_memory_database() {
        let pool = init_memory_pool().unwrap();

        let conn1 = get_conn(&pool).unwrap();
        conn1
            .execute("INSERT INTO users (name) VALUES ('Alice')", [])
            .unwrap();

        let conn2 = get_conn(&pool).unwrap();
        let name: String = conn2
            .query_row("SELECT name FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Alice");
    }

    #[test]
    fn test_memory_pools_are_isolated() {
        let first = init_memory_pool().unwrap();
        let second = init_memory_pool().unwrap();

        get_conn(&first)
            .unwrap()
            .execute("INSERT INTO users (name) VALUES ('Alice')", [])
            .unwrap();

        let count: i64 = get_conn(&second)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_file_pool_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("popcorn.sqlite");
        let path = path.to_string_lossy();

        {
            let pool = init_pool(&path).unwrap();
            get_conn(&pool)
                .unwrap()
                .execute("INSERT INTO users (name) VALUES ('Bob')", [])
                .unwrap();
        }

        let pool = init_pool(&path).unwrap();
        let name: String = get_conn(&pool)
            .unwrap()
            .query_row("SELECT name FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(name, "Bob");
    }
}
