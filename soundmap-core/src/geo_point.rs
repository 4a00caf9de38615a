//! Validated WGS84 positions.
//!
//! A [`GeoPoint`] can only be built through [`GeoPoint::new`], so every value
//! in circulation carries a latitude in `-90.0..=90.0` and a longitude in
//! `-180.0..=180.0`. Out-of-range and non-finite components are rejected
//! rather than clamped.

use std::ops::RangeInclusive;

use geo::{Coord, Point};
use thiserror::Error;

const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was non-finite or outside `-90.0..=90.0`.
    #[error("latitude {value} must be a finite number between -90 and 90")]
    InvalidLatitude {
        /// Rejected latitude in degrees.
        value: f64,
    },
    /// Longitude was non-finite or outside `-180.0..=180.0`.
    #[error("longitude {value} must be a finite number between -180 and 180")]
    InvalidLongitude {
        /// Rejected longitude in degrees.
        value: f64,
    },
}

/// An immutable latitude/longitude pair in degrees.
///
/// Internally the point is a [`Coord`] with `x = longitude` and
/// `y = latitude`, so it converts losslessly into `geo` types.
///
/// # Examples
/// ```
/// use soundmap_core::GeoPoint;
///
/// # fn main() -> Result<(), soundmap_core::GeoPointError> {
/// let harbour = GeoPoint::new(54.32, 10.14)?;
/// assert_eq!(harbour.latitude(), 54.32);
/// assert_eq!(harbour.longitude(), 10.14);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LatLon", into = "LatLon"))]
pub struct GeoPoint {
    coord: Coord<f64>,
}

impl GeoPoint {
    /// Validate and construct a [`GeoPoint`].
    ///
    /// # Errors
    /// Returns [`GeoPointError`] when either component is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointError> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(GeoPointError::InvalidLatitude { value: latitude });
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(GeoPointError::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            coord: Coord {
                x: longitude,
                y: latitude,
            },
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coord.x
    }

    /// The underlying `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        self.coord
    }

    /// Great-circle distance to `other` in meters.
    ///
    /// Shorthand for [`distance_meters`](crate::distance_meters).
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        crate::distance_meters(*self, *other)
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        point.coord
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self(point.coord)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude(), self.longitude())
    }
}

/// Wire shape used by serde; validation runs on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LatLon {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<LatLon> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(raw: LatLon) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<GeoPoint> for LatLon {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }
    }
}
