//! Popcorn-Common: Shared types and error handling.
//!
//! - **Typed IDs**: integer row-id wrappers for users and movies
//! - **Outcome**: the data manager's done / not-found / failed result
//! - **Error Handling**: common error type and result alias
//!
//! # Examples
//!
//! ```
//! use popcorn_common::{Error, MovieId, Outcome};
//!
//! let id = MovieId::new(1);
//! let outcome: Outcome<MovieId> = Outcome::Done(id);
//! assert_eq!(outcome.ok(), Some(id));
//!
//! let failed: Outcome<Vec<MovieId>> = Outcome::Failed(Error::database("locked"));
//! assert!(failed.unwrap_or_default().is_empty());
//! ```

pub mod error;
pub mod ids;
pub mod outcome;

pub use error::{Error, Result};
pub use ids::*;
pub use outcome::Outcome;
