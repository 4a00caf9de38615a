//! `profile` command: show or update the locally stored profile.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use soundmap_core::{Profile, ProfileStore};

use crate::output::write_json;
use crate::{
    ARG_CLEAR_PHOTO, ARG_NAME, ARG_PHOTO_URI, ARG_STORE, CliError, open_store, store_path,
};

/// CLI arguments for the `profile` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print the profile kept in the local store. Supplying a \
                 name or photo URI updates that field first; fields that \
                 are not supplied keep their stored values. --clear-photo \
                 forgets the stored photo.",
    about = "Show or update the local profile"
)]
#[ortho_config(prefix = "SOUNDMAP")]
pub(crate) struct ProfileArgs {
    /// New display name.
    #[arg(long = ARG_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) name: Option<String>,
    /// URI of the new profile photo.
    #[arg(long = ARG_PHOTO_URI, value_name = "uri")]
    #[serde(default)]
    pub(crate) photo_uri: Option<String>,
    /// Forget the stored profile photo.
    #[arg(long = ARG_CLEAR_PHOTO, conflicts_with = "photo_uri")]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) clear_photo: bool,
    /// Path to the local key-value store.
    #[arg(long = ARG_STORE, value_name = "path")]
    #[serde(default)]
    pub(crate) store: Option<Utf8PathBuf>,
}

impl ProfileArgs {
    pub(crate) fn into_config(self) -> Result<ProfileConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(ProfileConfig::from(merged))
    }
}

/// Resolved `profile` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProfileConfig {
    pub(crate) update: Profile,
    pub(crate) clear_photo: bool,
    pub(crate) store: Utf8PathBuf,
}

impl ProfileConfig {
    const fn has_update(&self) -> bool {
        self.update.name.is_some() || self.update.photo_uri.is_some()
    }
}

impl From<ProfileArgs> for ProfileConfig {
    fn from(args: ProfileArgs) -> Self {
        Self {
            update: Profile {
                name: args.name,
                photo_uri: args.photo_uri,
            },
            clear_photo: args.clear_photo,
            store: store_path(args.store),
        }
    }
}

pub(crate) fn run_profile(args: ProfileArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_profile_with(args, &mut stdout)
}

pub(crate) fn run_profile_with(args: ProfileArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut profiles = ProfileStore::new(open_store(&config.store)?);
    if config.has_update() {
        profiles.save(&config.update)?;
        info!("updated profile in {}", config.store);
    }
    if config.clear_photo {
        profiles.clear_photo()?;
        info!("cleared profile photo in {}", config.store);
    }
    let profile = profiles.load()?;
    write_json(writer, &profile)
}
