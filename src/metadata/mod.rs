//! Movie metadata retrieval from external services.
//!
//! # Module layout
//!
//! - [`provider`] -- The [`MovieLookup`] trait, result and error types.
//! - [`providers`] -- Concrete backends (OMDb).

pub mod provider;
pub mod providers;

pub use provider::{imdb_link, LookupError, MovieFields, MovieLookup, RetrievedMovie};
pub use providers::OmdbProvider;
