//! Decide which known location, if any, the user is standing at.
//!
//! Matching is first-match-wins in the order candidates were supplied, not
//! nearest-match. The threshold is always a parameter; callers wanting the
//! usual radius pass [`DEFAULT_PROXIMITY_METERS`].

use crate::{DistanceMetric, GeoPoint, Haversine, Location};

/// Radius within which the mobile client treats a user as "at" a location.
pub const DEFAULT_PROXIMITY_METERS: f64 = 100.0;

/// Outcome of [`find_nearby`].
///
/// `NotMatched` is the common case of a user away from every known location;
/// it is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProximityResult<'a> {
    /// A candidate lay within the threshold.
    Matched {
        /// The first qualifying candidate in input order.
        location: &'a Location,
        /// Distance from the user to `location` in meters.
        distance_meters: f64,
    },
    /// No candidate lay within the threshold.
    NotMatched,
}

impl<'a> ProximityResult<'a> {
    /// Whether a location was matched.
    #[must_use]
    pub const fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// The matched location, if any.
    #[must_use]
    pub const fn location(&self) -> Option<&'a Location> {
        match self {
            Self::Matched { location, .. } => Some(*location),
            Self::NotMatched => None,
        }
    }

    /// Distance to the matched location, if any.
    #[must_use]
    pub const fn distance_meters(&self) -> Option<f64> {
        match self {
            Self::Matched {
                distance_meters, ..
            } => Some(*distance_meters),
            Self::NotMatched => None,
        }
    }
}

/// Return the first candidate within `max_distance_meters` of `user`.
///
/// Distances use the haversine metric. A candidate qualifies when its
/// distance is less than or equal to the threshold. A negative or
/// non-finite threshold matches nothing.
///
/// # Examples
/// ```
/// use soundmap_core::{DEFAULT_PROXIMITY_METERS, GeoPoint, Location, find_nearby};
///
/// # fn main() -> Result<(), soundmap_core::GeoPointError> {
/// let user = GeoPoint::new(54.3233, 10.1228)?;
/// let candidates = vec![
///     Location::new(1, "Far away", GeoPoint::new(53.55, 9.99)?),
///     Location::new(2, "Around the corner", GeoPoint::new(54.3236, 10.1228)?),
/// ];
///
/// let result = find_nearby(user, &candidates, DEFAULT_PROXIMITY_METERS);
/// assert_eq!(result.location().map(|l| l.id), Some(2));
/// assert!(!find_nearby(user, &[], DEFAULT_PROXIMITY_METERS).is_matched());
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn find_nearby(
    user: GeoPoint,
    candidates: &[Location],
    max_distance_meters: f64,
) -> ProximityResult<'_> {
    find_nearby_by(&Haversine, user, candidates, max_distance_meters)
}

/// [`find_nearby`] with a caller-supplied [`DistanceMetric`].
///
/// The metric is not consulted at all for an empty candidate slice or an
/// unusable threshold, and is consulted at most once per candidate up to the
/// first match.
#[must_use]
pub fn find_nearby_by<'a, M>(
    metric: &M,
    user: GeoPoint,
    candidates: &'a [Location],
    max_distance_meters: f64,
) -> ProximityResult<'a>
where
    M: DistanceMetric + ?Sized,
{
    if candidates.is_empty() || !is_usable_threshold(max_distance_meters) {
        return ProximityResult::NotMatched;
    }
    candidates
        .iter()
        .find_map(|location| {
            let distance_meters = metric.distance_meters(user, location.position);
            (distance_meters <= max_distance_meters).then_some(ProximityResult::Matched {
                location,
                distance_meters,
            })
        })
        .unwrap_or(ProximityResult::NotMatched)
}

const fn is_usable_threshold(max_distance_meters: f64) -> bool {
    max_distance_meters.is_finite() && max_distance_meters >= 0.0
}
