//! Concrete lookup provider implementations.
//!
//! Each submodule wraps a single external API and implements the
//! [`MovieLookup`](super::MovieLookup) trait.

pub mod omdb;

pub use omdb::OmdbProvider;
