//! REST client for the remote sample catalogue.
//!
//! [`HttpCatalogue`] implements [`soundmap_core::SampleCatalogue`] against
//! these endpoints, relative to a configurable base URL:
//!
//! | Method | Path                             | Body / response                            |
//! |--------|----------------------------------|--------------------------------------------|
//! | GET    | `location/`                      | `[{ id, name, latitude, longitude }]`      |
//! | GET    | `sample/`                        | `[{ id, name, datetime, recording_data }]` |
//! | GET    | `sampletolocation/`              | `[{ sample_id, location_id }]`             |
//! | GET    | `samplerating/?sample_id={id}`   | `[{ sample_id, rating }]`                  |
//! | POST   | `samplerating/`                  | `{ api_key, sample_id, rating }`           |
//!
//! When an API key is configured every request also carries it as the
//! `api_key` query parameter.
//!
//! Responses are normalised into core types before they leave this module,
//! so callers never see a coordinate or score that failed validation.

mod client;
mod records;

pub use client::{
    CatalogueBuildError, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpCatalogue, HttpCatalogueConfig,
};
