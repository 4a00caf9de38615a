//! Blocking [`SampleCatalogue`] over the catalogue's REST API.

use std::future::Future;
use std::time::Duration;

use futures_util::future::try_join_all;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use soundmap_core::{CatalogueError, Location, Rating, Sample, SampleCatalogue, SampleLocation};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::records::{
    LocationRecord, RatingRecord, RatingSubmission, SampleLocationRecord, SampleRecord, normalise,
};

/// Default catalogue base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default user agent for catalogue requests.
pub const DEFAULT_USER_AGENT: &str = "soundmap/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const RATINGS_PATH: &str = "samplerating/";

/// Errors raised while constructing an [`HttpCatalogue`].
#[derive(Debug, Error)]
pub enum CatalogueBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be built.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Configuration for [`HttpCatalogue`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpCatalogueConfig {
    /// Service root, e.g. `"http://localhost:8080"`.
    pub base_url: String,
    /// Key sent as the `api_key` query parameter and in submitted ratings.
    pub api_key: Option<String>,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpCatalogueConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl std::fmt::Debug for HttpCatalogueConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogueConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpCatalogueConfig {
    /// Configuration for `base_url` with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Authenticate requests with `api_key`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// REST-backed [`SampleCatalogue`].
///
/// The trait is synchronous, so each call blocks on the HTTP request. The
/// catalogue owns a current-thread Tokio runtime for this. Called from inside
/// a multi-threaded runtime it borrows that runtime through
/// [`tokio::task::block_in_place`] instead; inside a current-thread runtime
/// it falls back to its own, which can deadlock if the caller's runtime
/// drives I/O this request needs.
///
/// [`SampleCatalogue::ratings_for`] issues one request per sample
/// concurrently and returns once all have completed.
///
/// # Examples
/// ```no_run
/// use soundmap_core::SampleCatalogue;
/// use soundmap_data::{HttpCatalogue, HttpCatalogueConfig};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HttpCatalogueConfig::new("http://localhost:8080")
///     .with_timeout(Duration::from_secs(10));
/// let catalogue = HttpCatalogue::with_config(config)?;
/// for location in catalogue.locations()? {
///     println!("{} at {}", location.name, location.position);
/// }
/// # Ok(())
/// # }
/// ```
pub struct HttpCatalogue {
    client: Client,
    config: HttpCatalogueConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpCatalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogue")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HttpCatalogue {
    /// Catalogue at `base_url` with default settings.
    ///
    /// # Errors
    /// Returns [`CatalogueBuildError`] if the client or runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogueBuildError> {
        Self::with_config(HttpCatalogueConfig::new(base_url))
    }

    /// Catalogue with explicit configuration.
    ///
    /// # Errors
    /// Returns [`CatalogueBuildError`] if the client or runtime fails to build.
    pub fn with_config(config: HttpCatalogueConfig) -> Result<Self, CatalogueBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(CatalogueBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CatalogueBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpCatalogueConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.query(&[("api_key", key.as_str())]),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogueError> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        let response = self
            .authenticated(self.client.get(&url))
            .query(query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        response.json().await.map_err(|err| {
            if err.is_timeout() {
                self.convert_reqwest_error(&err, &url)
            } else {
                CatalogueError::ParseError {
                    message: format!("{url}: {err}"),
                }
            }
        })
    }

    async fn fetch_ratings(&self, sample_id: u64) -> Result<Vec<Rating>, CatalogueError> {
        let records: Vec<RatingRecord> = self
            .get_json(RATINGS_PATH, &[("sample_id", sample_id.to_string())])
            .await?;
        records
            .into_iter()
            .map(|record| record.into_rating(sample_id))
            .collect()
    }

    async fn post_rating(&self, rating: &Rating) -> Result<(), CatalogueError> {
        let url = self.endpoint(RATINGS_PATH);
        debug!("POST {url} for sample {}", rating.sample_id);
        let body = RatingSubmission::new(rating, self.config.api_key.as_deref());
        self.authenticated(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        Ok(())
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> CatalogueError {
        if error.is_timeout() {
            return CatalogueError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return CatalogueError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        CatalogueError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Drive `future` to completion from synchronous code.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

impl SampleCatalogue for HttpCatalogue {
    fn locations(&self) -> Result<Vec<Location>, CatalogueError> {
        let records: Vec<LocationRecord> = self.block_on(self.get_json("location/", &[]))?;
        normalise(records)
    }

    fn samples(&self) -> Result<Vec<Sample>, CatalogueError> {
        let records: Vec<SampleRecord> = self.block_on(self.get_json("sample/", &[]))?;
        normalise(records)
    }

    fn sample_locations(&self) -> Result<Vec<SampleLocation>, CatalogueError> {
        let records: Vec<SampleLocationRecord> =
            self.block_on(self.get_json("sampletolocation/", &[]))?;
        normalise(records)
    }

    fn ratings(&self, sample_id: u64) -> Result<Vec<Rating>, CatalogueError> {
        self.block_on(self.fetch_ratings(sample_id))
    }

    fn ratings_for(&self, sample_ids: &[u64]) -> Result<Vec<Vec<Rating>>, CatalogueError> {
        let requests = sample_ids.iter().map(|&id| self.fetch_ratings(id));
        self.block_on(try_join_all(requests))
    }

    fn submit_rating(&self, rating: &Rating) -> Result<(), CatalogueError> {
        self.block_on(self.post_rating(rating))
    }
}
