//! User database queries.

use popcorn_common::{Error, Result, UserId};
use rusqlite::Connection;

use crate::models::User;

/// Insert a user and return it with its assigned id.
pub fn create_user(conn: &Connection, name: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (name) VALUES (:name)",
        rusqlite::named_params! { ":name": name },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(User {
        id: UserId::new(conn.last_insert_rowid()),
        name: name.to_string(),
    })
}

/// Get a user by ID.
///
/// # Returns
///
/// * `Ok(Some(User))` - The user if found
/// * `Ok(None)` - If the user does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, name FROM users WHERE id = :id",
        rusqlite::named_params! { ":id": id.get() },
        User::from_row,
    );

    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// List all users in creation order.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare("SELECT id, name FROM users ORDER BY id")
        .map_err(|e| Error::database(e.to_string()))?;

    let users = stmt
        .query_map([], User::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(users)
}
