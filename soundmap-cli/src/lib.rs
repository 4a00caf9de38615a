//! Command-line client for browsing and rating Soundmap samples.
//!
//! Each subcommand layers its options from configuration files, `SOUNDMAP_`
//! environment variables, and CLI flags, then prints its result as JSON.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use soundmap_core::{DEFAULT_PROXIMITY_METERS, RatingCache};
use soundmap_data::JsonFileStore;

mod catalogue;
mod error;
mod locations;
mod nearby;
mod output;
mod profile;
mod rate;

pub use error::CliError;

use locations::{LocationsArgs, run_locations};
use nearby::{NearbyArgs, run_nearby};
use profile::{ProfileArgs, run_profile};
use rate::{RateArgs, run_rate};

pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_RADIUS_METERS: &str = "radius-meters";
pub(crate) const ARG_API_BASE_URL: &str = "api-base-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_STORE: &str = "store";
pub(crate) const ARG_SAMPLE_ID: &str = "sample-id";
pub(crate) const ARG_VALUE: &str = "value";
pub(crate) const ARG_NAME: &str = "name";
pub(crate) const ARG_PHOTO_URI: &str = "photo-uri";
pub(crate) const ARG_CLEAR_PHOTO: &str = "clear-photo";
pub(crate) const ENV_NEARBY_LATITUDE: &str = "SOUNDMAP_CMDS_NEARBY_LATITUDE";
pub(crate) const ENV_NEARBY_LONGITUDE: &str = "SOUNDMAP_CMDS_NEARBY_LONGITUDE";
pub(crate) const ENV_LOCATIONS_LATITUDE: &str = "SOUNDMAP_CMDS_LOCATIONS_LATITUDE";
pub(crate) const ENV_LOCATIONS_LONGITUDE: &str = "SOUNDMAP_CMDS_LOCATIONS_LONGITUDE";
pub(crate) const ENV_RATE_SAMPLE_ID: &str = "SOUNDMAP_CMDS_RATE_SAMPLE_ID";
pub(crate) const ENV_RATE_VALUE: &str = "SOUNDMAP_CMDS_RATE_VALUE";

/// Store file used when `--store` is not given.
pub const DEFAULT_STORE_PATH: &str = "soundmap.json";

/// Run the Soundmap CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, the catalogue, the
/// local store, or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Locations(args) => run_locations(args),
        Command::Nearby(args) => run_nearby(args),
        Command::Rate(args) => run_rate(args),
        Command::Profile(args) => run_profile(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "soundmap",
    about = "Discover and rate audio samples pinned to nearby places",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every catalogue location.
    Locations(LocationsArgs),
    /// Show the samples at the nearest location within range.
    Nearby(NearbyArgs),
    /// Submit a rating for a sample.
    Rate(RateArgs),
    /// Show or update the local user profile.
    Profile(ProfileArgs),
}

pub(crate) fn store_path(store: Option<Utf8PathBuf>) -> Utf8PathBuf {
    store.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_STORE_PATH))
}

/// The configured radius, or the default, rejecting negative and non-finite
/// values before any catalogue call.
pub(crate) fn radius_or_default(radius_meters: Option<f64>) -> Result<f64, CliError> {
    let radius = radius_meters.unwrap_or(DEFAULT_PROXIMITY_METERS);
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(CliError::InvalidRadius { value: radius })
    }
}

pub(crate) fn open_store(path: &Utf8Path) -> Result<JsonFileStore, CliError> {
    JsonFileStore::open(path).map_err(|source| CliError::OpenStore {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn open_rating_cache(path: &Utf8Path) -> Result<RatingCache<JsonFileStore>, CliError> {
    open_store(path).map(RatingCache::new)
}

#[cfg(test)]
mod tests;
