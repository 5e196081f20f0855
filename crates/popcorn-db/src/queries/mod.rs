//! Database query modules.
//!
//! Plain functions over a `&Connection`, grouped by table:
//! - users: user creation and lookup
//! - movies: movie CRUD and per-user listing
//!
//! Callers that need atomicity pass a transaction, which derefs to a
//! connection.

pub mod movies;
pub mod users;
