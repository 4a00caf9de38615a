//! Facade crate for the Soundmap sample browser.
//!
//! This crate re-exports the core domain types and operations, and exposes
//! the HTTP catalogue and file-backed store behind the `http-catalogue`
//! feature.

#![forbid(unsafe_code)]

pub use soundmap_core::{
    CatalogueError, DEFAULT_PROXIMITY_METERS, DistanceMetric, FixedPosition, GeoPoint,
    GeoPointError, Haversine, KeyValueStore, Location, MemoryKeyValueStore, NearbySamples,
    PositionError, PositionSource, Profile, ProfileError, ProfileStore, ProximityResult, Rating,
    RatingCache, RatingCacheError, RatingError, RatingSummary, RatingValue, ResolveError, Sample,
    SampleCatalogue, SampleLocation, SampleSummary, StoreError, average, distance_meters,
    find_nearby, mean, rate_sample, resolve_nearby, resolve_nearby_from, summarise_sample,
};

#[cfg(feature = "test-support")]
pub use soundmap_core::test_support;

#[cfg(feature = "http-catalogue")]
pub use soundmap_data::{HttpCatalogue, HttpCatalogueConfig, JsonFileStore, JsonStoreError};
