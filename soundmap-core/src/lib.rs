//! Core domain for the Soundmap client.
//!
//! Soundmap pins audio samples to named locations. A user standing within a
//! small radius of a location can listen to its samples, see their average
//! rating and submit their own. This crate holds everything that does not
//! talk to the network or the file system:
//!
//! - validated coordinates and great-circle distance;
//! - first-match proximity search over a location list;
//! - rating validation, averaging and the local "my rating" cache;
//! - the local profile record;
//! - the [`SampleCatalogue`] and [`PositionSource`] collaborator traits and
//!   the [`resolve_nearby`] flow that ties them together.
//!
//! Constructors return `Result` so invalid input is rejected at the boundary.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregate;
pub mod catalogue;
pub mod distance;
pub mod geo_point;
pub mod location;
pub mod position;
pub mod profile;
pub mod proximity;
pub mod rating;
pub mod rating_cache;
pub mod resolver;
pub mod sample;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use aggregate::{RatingSummary, average, mean};
pub use catalogue::{CatalogueError, SampleCatalogue};
pub use distance::{DistanceMetric, EARTH_MEAN_RADIUS_METERS, Haversine, distance_meters};
pub use geo_point::{GeoPoint, GeoPointError};
pub use location::Location;
pub use position::{FixedPosition, PositionError, PositionSource};
pub use profile::{Profile, ProfileError, ProfileStore};
pub use proximity::{DEFAULT_PROXIMITY_METERS, ProximityResult, find_nearby, find_nearby_by};
pub use rating::{Rating, RatingError, RatingValue};
pub use rating_cache::{RatingCache, RatingCacheError, rating_key};
pub use resolver::{
    NearbySamples, ResolveError, SampleSummary, rate_sample, resolve_nearby, resolve_nearby_from,
    summarise_ratings, summarise_sample,
};
pub use sample::{Sample, SampleLocation, samples_at};
pub use store::{KeyValueStore, MemoryKeyValueStore, StoreError};
