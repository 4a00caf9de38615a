//! `nearby` command: resolve the closest location and its rated samples.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use soundmap_core::{FixedPosition, GeoPoint, NearbySamples, resolve_nearby_from};

use crate::catalogue::{CatalogueBuilder, HttpCatalogueBuilder, base_url_or_default};
use crate::output::write_json;
use crate::{
    ARG_API_BASE_URL, ARG_API_KEY, ARG_LATITUDE, ARG_LONGITUDE, ARG_RADIUS_METERS, ARG_STORE,
    CliError, ENV_NEARBY_LATITUDE, ENV_NEARBY_LONGITUDE, open_rating_cache, radius_or_default,
    store_path,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the catalogue location closest to the given position \
                 and list the samples pinned to it with their aggregated \
                 ratings. Prints {\"matched\": false} when nothing is within \
                 range.",
    about = "Show samples at the nearest location"
)]
#[ortho_config(prefix = "SOUNDMAP")]
pub(crate) struct NearbyArgs {
    /// Latitude of the current position in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the current position in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Maximum distance to a location, in meters (default 100).
    #[arg(long = ARG_RADIUS_METERS, value_name = "meters")]
    #[serde(default)]
    pub(crate) radius_meters: Option<f64>,
    /// Root URL of the sample catalogue service.
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Key for the sample catalogue service.
    #[arg(long = ARG_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Path to the local key-value store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) position: GeoPoint,
    pub(crate) radius_meters: f64,
    pub(crate) api_base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) store: Utf8PathBuf,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_NEARBY_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_NEARBY_LONGITUDE,
        })?;
        let position = GeoPoint::new(latitude, longitude)?;

        Ok(Self {
            position,
            radius_meters: radius_or_default(args.radius_meters)?,
            api_base_url: base_url_or_default(args.api_base_url),
            api_key: args.api_key,
            store: store_path(args.store),
        })
    }
}

/// JSON shape printed by `nearby`.
#[derive(Debug, Serialize)]
struct NearbyReport<'a> {
    matched: bool,
    #[serde(flatten)]
    nearby: Option<&'a NearbySamples>,
}

pub(crate) fn run_nearby(args: NearbyArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_nearby_with(args, &HttpCatalogueBuilder, &mut stdout)
}

pub(crate) fn run_nearby_with(
    args: NearbyArgs,
    builder: &dyn CatalogueBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = builder.build(&config.api_base_url, config.api_key.as_deref())?;
    let cache = open_rating_cache(&config.store)?;
    let position = FixedPosition::new(config.position);

    let nearby = resolve_nearby_from(&position, &*catalogue, &cache, config.radius_meters)?;
    if nearby.is_none() {
        info!(
            "no location within {} m of {:?}",
            config.radius_meters, config.position
        );
    }
    let report = NearbyReport {
        matched: nearby.is_some(),
        nearby: nearby.as_ref(),
    };
    write_json(writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearbyConfig, CliError> {
    let merged = NearbyArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearbyConfig::try_from(merged)
}
