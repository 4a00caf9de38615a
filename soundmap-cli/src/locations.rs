//! `locations` command: list every catalogue location, optionally measured
//! from the current position.

use std::io::Write;

use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use soundmap_core::{GeoPoint, Location};

use crate::catalogue::{CatalogueBuilder, HttpCatalogueBuilder, base_url_or_default};
use crate::output::write_json;
use crate::{
    ARG_API_BASE_URL, ARG_API_KEY, ARG_LATITUDE, ARG_LONGITUDE, ARG_RADIUS_METERS, CliError,
    ENV_LOCATIONS_LATITUDE, ENV_LOCATIONS_LONGITUDE, radius_or_default,
};

/// CLI arguments for the `locations` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List every location known to the catalogue in catalogue \
                 order. When a position is given, each entry also carries \
                 its distance in meters and whether it lies within the \
                 radius.",
    about = "List all catalogue locations"
)]
#[ortho_config(prefix = "SOUNDMAP")]
pub(crate) struct LocationsArgs {
    /// Latitude of the current position in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the current position in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// Radius used to flag locations in range, in meters (default 100).
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
}

impl LocationsArgs {
    pub(crate) fn into_config(self) -> Result<LocationsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LocationsConfig::try_from(merged)
    }
}

/// Resolved `locations` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LocationsConfig {
    pub(crate) position: Option<GeoPoint>,
    pub(crate) radius_meters: f64,
    pub(crate) api_base_url: String,
    pub(crate) api_key: Option<String>,
}

impl TryFrom<LocationsArgs> for LocationsConfig {
    type Error = CliError;

    fn try_from(args: LocationsArgs) -> Result<Self, Self::Error> {
        let position = match (args.latitude, args.longitude) {
            (None, None) => None,
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)?),
            (None, Some(_)) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LATITUDE,
                    env: ENV_LOCATIONS_LATITUDE,
                });
            }
            (Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LONGITUDE,
                    env: ENV_LOCATIONS_LONGITUDE,
                });
            }
        };
        Ok(Self {
            position,
            radius_meters: radius_or_default(args.radius_meters)?,
            api_base_url: base_url_or_default(args.api_base_url),
            api_key: args.api_key,
        })
    }
}

/// One location as printed by `locations`.
#[derive(Debug, Serialize)]
struct LocationEntry<'a> {
    #[serde(flatten)]
    location: &'a Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_range: Option<bool>,
}

impl<'a> LocationEntry<'a> {
    fn measured(location: &'a Location, position: Option<GeoPoint>, radius_meters: f64) -> Self {
        let distance_meters = position.map(|user| user.distance_to(&location.position));
        Self {
            location,
            distance_meters,
            in_range: distance_meters.map(|distance| distance <= radius_meters),
        }
    }
}

#[derive(Debug, Serialize)]
struct LocationsReport<'a> {
    locations: Vec<LocationEntry<'a>>,
}

pub(crate) fn run_locations(args: LocationsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_locations_with(args, &HttpCatalogueBuilder, &mut stdout)
}

pub(crate) fn run_locations_with(
    args: LocationsArgs,
    builder: &dyn CatalogueBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = builder.build(&config.api_base_url, config.api_key.as_deref())?;
    let locations = catalogue.locations()?;
    debug!("catalogue lists {} locations", locations.len());

    let report = LocationsReport {
        locations: locations
            .iter()
            .map(|location| {
                LocationEntry::measured(location, config.position, config.radius_meters)
            })
            .collect(),
    };
    write_json(writer, &report)
}
