//! Popcorn - personal movie lists enriched from OMDb
//!
//! This library crate exposes the lookup, configuration and HTTP layers for
//! the binary and for integration testing. Storage lives in `popcorn-db`.

pub mod config;
pub mod library;
pub mod metadata;
pub mod server;
