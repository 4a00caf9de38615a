//! `rate` command: submit a score and remember it locally.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use soundmap_core::{Rating, RatingSummary, RatingValue, rate_sample, summarise_sample};

use crate::catalogue::{CatalogueBuilder, HttpCatalogueBuilder, base_url_or_default};
use crate::output::write_json;
use crate::{
    ARG_API_BASE_URL, ARG_API_KEY, ARG_SAMPLE_ID, ARG_STORE, ARG_VALUE, CliError,
    ENV_RATE_SAMPLE_ID, ENV_RATE_VALUE, open_rating_cache, store_path,
};

/// CLI arguments for the `rate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Submit a 1-5 rating for a sample. The rating is cached \
                 locally once the catalogue accepts it, and the sample's \
                 refreshed rating summary is printed.",
    about = "Rate a sample"
)]
#[ortho_config(prefix = "SOUNDMAP")]
pub(crate) struct RateArgs {
    /// Identifier of the sample to rate.
    #[arg(long = ARG_SAMPLE_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) sample_id: Option<u64>,
    /// Score between 1 and 5.
    #[arg(long = ARG_VALUE, value_name = "score", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) value: Option<i64>,
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

impl RateArgs {
    pub(crate) fn into_config(self) -> Result<RateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateConfig::try_from(merged)
    }
}

/// Resolved `rate` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RateConfig {
    pub(crate) rating: Rating,
    pub(crate) api_base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) store: Utf8PathBuf,
}

impl TryFrom<RateArgs> for RateConfig {
    type Error = CliError;

    fn try_from(args: RateArgs) -> Result<Self, Self::Error> {
        let sample_id = args.sample_id.ok_or(CliError::MissingArgument {
            field: ARG_SAMPLE_ID,
            env: ENV_RATE_SAMPLE_ID,
        })?;
        let raw = args.value.ok_or(CliError::MissingArgument {
            field: ARG_VALUE,
            env: ENV_RATE_VALUE,
        })?;
        let value = RatingValue::try_from(raw)?;
        Ok(Self {
            rating: Rating::new(sample_id, value),
            api_base_url: base_url_or_default(args.api_base_url),
            api_key: args.api_key,
            store: store_path(args.store),
        })
    }
}

/// JSON shape printed by `rate`.
#[derive(Debug, Serialize)]
struct RateReport {
    sample_id: u64,
    rating: RatingSummary,
}

pub(crate) fn run_rate(args: RateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rate_with(args, &HttpCatalogueBuilder, &mut stdout)
}

pub(crate) fn run_rate_with(
    args: RateArgs,
    builder: &dyn CatalogueBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalogue = builder.build(&config.api_base_url, config.api_key.as_deref())?;
    let mut cache = open_rating_cache(&config.store)?;
    let Rating { sample_id, value } = config.rating;

    rate_sample(&*catalogue, &mut cache, config.rating)?;
    info!("rated sample {sample_id} with {value}");

    let rating = summarise_sample(&*catalogue, &cache, sample_id)?;
    write_json(writer, &RateReport { sample_id, rating })
}
