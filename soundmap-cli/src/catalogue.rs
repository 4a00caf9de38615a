//! Construction of the catalogue client used by the networked commands.

use soundmap_core::SampleCatalogue;
use soundmap_data::{DEFAULT_BASE_URL, HttpCatalogue, HttpCatalogueConfig};

use crate::CliError;

/// Builds the catalogue a command talks to.
pub(crate) trait CatalogueBuilder {
    fn build(
        &self,
        base_url: &str,
        api_key: Option<&str>,
    ) -> Result<Box<dyn SampleCatalogue>, CliError>;
}

/// Talks to the REST catalogue at the configured base URL.
pub(crate) struct HttpCatalogueBuilder;

impl CatalogueBuilder for HttpCatalogueBuilder {
    fn build(
        &self,
        base_url: &str,
        api_key: Option<&str>,
    ) -> Result<Box<dyn SampleCatalogue>, CliError> {
        let mut config = HttpCatalogueConfig::new(base_url);
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        let catalogue =
            HttpCatalogue::with_config(config).map_err(|source| CliError::BuildCatalogue {
                base_url: base_url.to_owned(),
                source,
            })?;
        Ok(Box::new(catalogue))
    }
}

pub(crate) fn base_url_or_default(base_url: Option<String>) -> String {
    base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}
