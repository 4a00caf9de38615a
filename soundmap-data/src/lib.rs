//! Boundary adapters for the Soundmap client.
//!
//! Responsibilities:
//! - Talk to the remote sample catalogue over HTTP ([`HttpCatalogue`]).
//! - Persist the local key-value store as a JSON file ([`JsonFileStore`]).
//! - Normalise wire records into validated `soundmap-core` types.
//!
//! Boundaries:
//! - Domain rules (proximity, aggregation, caching) live in `soundmap-core`.
//! - Async I/O stays inside the adapters; every public entry point is
//!   synchronous.

#![forbid(unsafe_code)]

pub mod api;
mod fs;
pub mod kv;

pub use api::{
    CatalogueBuildError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpCatalogue, HttpCatalogueConfig,
};
pub use kv::{JsonFileStore, JsonStoreError};
