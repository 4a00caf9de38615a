//! Error types emitted by the Soundmap CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use soundmap_core::{CatalogueError, GeoPointError, ProfileError, RatingError, ResolveError};
use soundmap_data::{CatalogueBuildError, JsonStoreError};
use thiserror::Error;

/// Errors emitted by the Soundmap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The supplied coordinates are not a valid position.
    #[error("invalid position: {0}")]
    InvalidPosition(#[from] GeoPointError),
    /// The proximity radius is negative or not finite.
    #[error("radius {value} must be a finite, non-negative number of meters")]
    InvalidRadius {
        /// Rejected radius.
        value: f64,
    },
    /// The supplied score is not a valid rating.
    #[error("invalid rating: {0}")]
    InvalidRating(#[from] RatingError),
    /// The local key-value store could not be opened.
    #[error("failed to open local store {path:?}: {source}")]
    OpenStore {
        /// Store location.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: JsonStoreError,
    },
    /// The catalogue client could not be constructed.
    #[error("failed to build catalogue client for {base_url:?}: {source}")]
    BuildCatalogue {
        /// Configured service root.
        base_url: String,
        /// Underlying failure.
        #[source]
        source: CatalogueBuildError,
    },
    /// A direct catalogue request failed.
    #[error("sample catalogue request failed: {0}")]
    Catalogue(#[from] CatalogueError),
    /// Resolving or rating samples failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Reading or writing the profile failed.
    #[error("profile update failed: {0}")]
    Profile(#[from] ProfileError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
