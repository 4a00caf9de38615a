//! Access to the remote sample catalogue.
//!
//! The `SampleCatalogue` trait abstracts the REST service that owns
//! locations, samples, their associations and submitted ratings. The trait is
//! synchronous so the core stays embeddable; adapters that speak HTTP block on
//! their own runtime internally.

use thiserror::Error;

use crate::{Location, Rating, Sample, SampleLocation};

/// Errors returned by [`SampleCatalogue`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The request could not be delivered.
    #[error("request to {url} failed: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport failure description.
        message: String,
    },
    /// The request exceeded its deadline.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Failure description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse catalogue response: {message}")]
    ParseError {
        /// Decoder failure description.
        message: String,
    },
    /// A decoded record failed validation, e.g. a non-numeric latitude.
    #[error("invalid {record} record: {message}")]
    InvalidRecord {
        /// Kind of record, such as `"location"`.
        record: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Read and rate samples held by the remote catalogue.
///
/// Implementations must be `Send + Sync` so one catalogue can serve
/// concurrent callers.
///
/// # Examples
///
/// ```rust
/// use soundmap_core::{
///     CatalogueError, Location, Rating, Sample, SampleCatalogue, SampleLocation,
/// };
///
/// struct EmptyCatalogue;
///
/// impl SampleCatalogue for EmptyCatalogue {
///     fn locations(&self) -> Result<Vec<Location>, CatalogueError> {
///         Ok(Vec::new())
///     }
///     fn samples(&self) -> Result<Vec<Sample>, CatalogueError> {
///         Ok(Vec::new())
///     }
///     fn sample_locations(&self) -> Result<Vec<SampleLocation>, CatalogueError> {
///         Ok(Vec::new())
///     }
///     fn ratings(&self, _sample_id: u64) -> Result<Vec<Rating>, CatalogueError> {
///         Ok(Vec::new())
///     }
///     fn submit_rating(&self, _rating: &Rating) -> Result<(), CatalogueError> {
///         Ok(())
///     }
/// }
///
/// let ratings = EmptyCatalogue.ratings_for(&[1, 2])?;
/// assert_eq!(ratings, vec![Vec::new(), Vec::new()]);
/// # Ok::<(), CatalogueError>(())
/// ```
pub trait SampleCatalogue: Send + Sync {
    /// All known locations, in the order the service lists them.
    fn locations(&self) -> Result<Vec<Location>, CatalogueError>;

    /// All published samples.
    fn samples(&self) -> Result<Vec<Sample>, CatalogueError>;

    /// The sample-to-location association list.
    fn sample_locations(&self) -> Result<Vec<SampleLocation>, CatalogueError>;

    /// Every rating submitted for `sample_id`.
    fn ratings(&self, sample_id: u64) -> Result<Vec<Rating>, CatalogueError>;

    /// Ratings for several samples, one list per id in input order.
    ///
    /// The default fetches sequentially and stops at the first failure.
    /// Network adapters may override this to fetch in parallel, but must
    /// return only once every list is complete.
    fn ratings_for(&self, sample_ids: &[u64]) -> Result<Vec<Vec<Rating>>, CatalogueError> {
        sample_ids.iter().map(|&id| self.ratings(id)).collect()
    }

    /// Record a new rating.
    fn submit_rating(&self, rating: &Rating) -> Result<(), CatalogueError>;
}
