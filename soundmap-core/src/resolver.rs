//! Resolve what the user should see at their current position.
//!
//! The flow is one-way: position and location list produce a matched
//! location, the association list produces its sample ids, and each sample's
//! rating list produces a [`RatingSummary`]. Every collaborator is passed in
//! explicitly; nothing here holds state between calls.

use std::collections::HashSet;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    CatalogueError, GeoPoint, KeyValueStore, Location, PositionError, PositionSource,
    ProximityResult, Rating, RatingCache, RatingCacheError, RatingSummary, RatingValue, Sample,
    SampleCatalogue, find_nearby, samples_at,
};

/// One sample with its rating summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleSummary {
    /// The sample itself.
    pub sample: Sample,
    /// Aggregated ratings and the user's cached score.
    pub rating: RatingSummary,
}

/// The location the user is at and the samples pinned there.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbySamples {
    /// Matched location.
    pub location: Location,
    /// Distance from the user to `location` in meters.
    pub distance_meters: f64,
    /// Samples pinned to `location`, in catalogue order.
    pub samples: Vec<SampleSummary>,
}

/// Errors raised while resolving nearby samples or submitting ratings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The remote catalogue failed.
    #[error("sample catalogue request failed: {0}")]
    Catalogue(#[from] CatalogueError),
    /// The local rating cache failed.
    #[error("rating cache failed: {0}")]
    Cache(#[from] RatingCacheError),
    /// No usable position was available.
    #[error("could not determine the current position: {0}")]
    Position(#[from] PositionError),
    /// The catalogue answered a batch rating request with the wrong shape.
    #[error("catalogue returned {actual} rating lists for {expected} samples")]
    RatingListMismatch {
        /// Number of samples requested.
        expected: usize,
        /// Number of lists returned.
        actual: usize,
    },
}

/// Find the location within `max_distance_meters` of `user` and summarise
/// the samples pinned to it.
///
/// Returns `Ok(None)` when no location is close enough. Ratings for all
/// samples are requested in one [`SampleCatalogue::ratings_for`] call and
/// aggregated only once every list has arrived.
///
/// # Errors
/// Propagates catalogue and cache failures as [`ResolveError`].
pub fn resolve_nearby<C, S>(
    catalogue: &C,
    cache: &RatingCache<S>,
    user: GeoPoint,
    max_distance_meters: f64,
) -> Result<Option<NearbySamples>, ResolveError>
where
    C: SampleCatalogue + ?Sized,
    S: KeyValueStore,
{
    let locations = catalogue.locations()?;
    let ProximityResult::Matched {
        location,
        distance_meters,
    } = find_nearby(user, &locations, max_distance_meters)
    else {
        debug!(
            "no location within {max_distance_meters} m of {user} among {} candidates",
            locations.len()
        );
        return Ok(None);
    };
    debug!(
        "user at {user} matched location {} ({distance_meters:.1} m)",
        location.id
    );

    let samples = pinned_samples(catalogue, location)?;
    let sample_ids: Vec<u64> = samples.iter().map(|sample| sample.id).collect();
    let rating_lists = if sample_ids.is_empty() {
        Vec::new()
    } else {
        catalogue.ratings_for(&sample_ids)?
    };
    if rating_lists.len() != sample_ids.len() {
        return Err(ResolveError::RatingListMismatch {
            expected: sample_ids.len(),
            actual: rating_lists.len(),
        });
    }

    let summaries = samples
        .into_iter()
        .zip(rating_lists)
        .map(|(sample, ratings)| {
            let mine = cache.cached_rating(sample.id)?;
            let rating = summarise_ratings(&ratings, sample.id, mine);
            Ok(SampleSummary { sample, rating })
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    Ok(Some(NearbySamples {
        location: location.clone(),
        distance_meters,
        samples: summaries,
    }))
}

/// [`resolve_nearby`] using the position reported by `source`.
///
/// # Errors
/// Returns [`ResolveError::Position`] without touching the catalogue when
/// the position cannot be obtained.
pub fn resolve_nearby_from<P, C, S>(
    source: &P,
    catalogue: &C,
    cache: &RatingCache<S>,
    max_distance_meters: f64,
) -> Result<Option<NearbySamples>, ResolveError>
where
    P: PositionSource + ?Sized,
    C: SampleCatalogue + ?Sized,
    S: KeyValueStore,
{
    let user = source.current_position()?;
    resolve_nearby(catalogue, cache, user, max_distance_meters)
}

/// Samples associated with `location`, in catalogue order, each once.
fn pinned_samples<C>(catalogue: &C, location: &Location) -> Result<Vec<Sample>, ResolveError>
where
    C: SampleCatalogue + ?Sized,
{
    let associations = catalogue.sample_locations()?;
    let wanted: HashSet<u64> = samples_at(location.id, &associations).into_iter().collect();
    if wanted.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let samples: Vec<Sample> = catalogue
        .samples()?
        .into_iter()
        .filter(|sample| wanted.contains(&sample.id) && seen.insert(sample.id))
        .collect();
    for missing in wanted.difference(&seen) {
        warn!(
            "sample {missing} is linked to location {} but missing from the catalogue",
            location.id
        );
    }
    Ok(samples)
}

/// Summarise the ratings in `ratings` that belong to `sample_id`.
///
/// Ratings for other samples are ignored.
///
/// # Examples
/// ```
/// use soundmap_core::{Rating, RatingValue, summarise_ratings};
///
/// # fn main() -> Result<(), soundmap_core::RatingError> {
/// let ratings = [
///     Rating::new(1, RatingValue::new(4)?),
///     Rating::new(2, RatingValue::new(1)?),
///     Rating::new(1, RatingValue::new(2)?),
/// ];
/// let summary = summarise_ratings(&ratings, 1, None);
/// assert_eq!(summary.average, Some(3.0));
/// assert_eq!(summary.count, 2);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn summarise_ratings(
    ratings: &[Rating],
    sample_id: u64,
    mine: Option<RatingValue>,
) -> RatingSummary {
    let values: Vec<RatingValue> = ratings
        .iter()
        .filter(|rating| {
            let belongs = rating.sample_id == sample_id;
            if !belongs {
                debug!(
                    "ignoring rating for sample {} while summarising sample {sample_id}",
                    rating.sample_id
                );
            }
            belongs
        })
        .map(|rating| rating.value)
        .collect();
    RatingSummary::new(&values, mine)
}

/// Fetch and summarise the ratings of a single sample.
///
/// # Errors
/// Propagates catalogue and cache failures as [`ResolveError`].
pub fn summarise_sample<C, S>(
    catalogue: &C,
    cache: &RatingCache<S>,
    sample_id: u64,
) -> Result<RatingSummary, ResolveError>
where
    C: SampleCatalogue + ?Sized,
    S: KeyValueStore,
{
    let ratings = catalogue.ratings(sample_id)?;
    let mine = cache.cached_rating(sample_id)?;
    Ok(summarise_ratings(&ratings, sample_id, mine))
}

/// Submit `rating` to the catalogue, then cache it as the user's own score.
///
/// The cache is written only after the catalogue accepted the rating.
///
/// # Errors
/// Returns [`ResolveError::Catalogue`] when submission fails and
/// [`ResolveError::Cache`] when the local write fails.
pub fn rate_sample<C, S>(
    catalogue: &C,
    cache: &mut RatingCache<S>,
    rating: Rating,
) -> Result<(), ResolveError>
where
    C: SampleCatalogue + ?Sized,
    S: KeyValueStore,
{
    catalogue.submit_rating(&rating)?;
    cache.set_cached_rating(rating.sample_id, rating.value)?;
    Ok(())
}
