//! Where the user currently is.

use thiserror::Error;

use crate::GeoPoint;

/// Errors returned by a [`PositionSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The user refused location access.
    #[error("location permission denied")]
    PermissionDenied,
    /// No fix could be obtained.
    #[error("position unavailable: {message}")]
    Unavailable {
        /// Platform failure description.
        message: String,
    },
}

/// Supplies the user's current position, e.g. from platform geolocation.
pub trait PositionSource {
    /// Return the current position.
    fn current_position(&self) -> Result<GeoPoint, PositionError>;
}

/// A [`PositionSource`] that always reports the same point.
///
/// # Examples
/// ```
/// use soundmap_core::{FixedPosition, GeoPoint, PositionSource};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let here = GeoPoint::new(54.32, 10.14)?;
/// assert_eq!(FixedPosition::new(here).current_position()?, here);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition {
    point: GeoPoint,
}

impl FixedPosition {
    /// Report `point` on every query.
    #[must_use]
    pub const fn new(point: GeoPoint) -> Self {
        Self { point }
    }
}

impl PositionSource for FixedPosition {
    fn current_position(&self) -> Result<GeoPoint, PositionError> {
        Ok(self.point)
    }
}
