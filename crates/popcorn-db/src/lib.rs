//! Popcorn-DB: schema, queries and the data manager.
//!
//! This crate stores users and their movie lists in SQLite using rusqlite
//! and r2d2 connection pooling.
//!
//! # Modules
//!
//! - `schema` - Table creation
//! - `pool` - Connection pool management
//! - `models` - Rust models matching the database schema
//! - `queries` - Plain query functions over a connection
//! - `manager` - The [`DataManager`] trait and its SQLite backend
//!
//! # Example
//!
//! ```
//! use popcorn_db::{DataManager, SqliteDataManager};
//!
//! let manager = SqliteDataManager::open_in_memory().unwrap();
//! let user = manager.add_user("Alice").ok().unwrap();
//! assert!(manager.get_user_movies(user.id).unwrap_or_default().is_empty());
//! ```

pub mod manager;
pub mod models;
pub mod pool;
pub mod queries;
pub mod schema;

pub use manager::{DataManager, SqliteDataManager};
pub use models::{Movie, MovieField, MovieUpdate, NewMovie, User};
