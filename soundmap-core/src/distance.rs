//! Great-circle distance between positions.
//!
//! Distances use the haversine formula on a spherical Earth with the mean
//! radius [`EARTH_MEAN_RADIUS_METERS`]. The [`DistanceMetric`] trait lets the
//! proximity matcher run against other metrics, which tests use to observe
//! how often distances are computed.

use crate::GeoPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_MEAN_RADIUS_METERS: f64 = 6_371_000.0;

/// Measure the distance in meters between two positions.
///
/// Implementations must be symmetric, return `0.0` for identical inputs, and
/// never return a negative or non-finite value for valid [`GeoPoint`]s.
///
/// # Examples
///
/// ```rust
/// use soundmap_core::{DistanceMetric, GeoPoint};
///
/// struct Manhattan;
///
/// impl DistanceMetric for Manhattan {
///     fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64 {
///         ((a.latitude() - b.latitude()).abs() + (a.longitude() - b.longitude()).abs())
///             * 111_000.0
///     }
/// }
///
/// let origin = GeoPoint::new(0.0, 0.0)?;
/// assert_eq!(Manhattan.distance_meters(origin, origin), 0.0);
/// # Ok::<(), soundmap_core::GeoPointError>(())
/// ```
pub trait DistanceMetric: Send + Sync {
    /// Return the distance between `a` and `b` in meters.
    fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64;
}

/// The haversine great-circle metric.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Haversine;

impl DistanceMetric for Haversine {
    fn distance_meters(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        distance_meters(a, b)
    }
}

/// Great-circle distance between `a` and `b` in meters.
///
/// The intermediate haversine term is clamped to `0.0..=1.0` before the
/// `atan2` step, so rounding near antipodal points cannot leave the domain of
/// the square root. Identical points yield exactly `0.0`.
///
/// # Examples
/// ```
/// use soundmap_core::{GeoPoint, distance_meters};
///
/// let equator = GeoPoint::new(0.0, 0.0)?;
/// let one_north = GeoPoint::new(1.0, 0.0)?;
/// let d = distance_meters(equator, one_north);
/// assert!((d - 111_195.0).abs() < 1.0);
/// # Ok::<(), soundmap_core::GeoPointError>(())
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let half_delta_lat = (b.latitude() - a.latitude()).to_radians() / 2.0;
    let half_delta_lon = (b.longitude() - a.longitude()).to_radians() / 2.0;

    let raw_term = half_delta_lat.sin().powi(2)
        + lat_a.cos() * lat_b.cos() * half_delta_lon.sin().powi(2);
    let term = raw_term.clamp(0.0, 1.0);
    let central_angle = 2.0 * term.sqrt().atan2((1.0 - term).sqrt());

    EARTH_MEAN_RADIUS_METERS * central_angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).expect("test coordinates are valid")
    }

    #[rstest]
    #[case(point(0.0, 0.0))]
    #[case(point(90.0, 180.0))]
    #[case(point(-90.0, -180.0))]
    #[case(point(54.323_29, 10.122_77))]
    fn identical_points_are_zero_apart(#[case] p: GeoPoint) {
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[rstest]
    fn one_degree_of_latitude_at_the_equator() {
        let d = distance_meters(point(0.0, 0.0), point(1.0, 0.0));
        let expected = 111_195.0;
        assert!((d - expected).abs() <= expected * 0.01, "got {d}");
    }

    #[rstest]
    fn antipodal_points_are_half_a_circumference_apart() {
        let d = distance_meters(point(0.0, 0.0), point(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_MEAN_RADIUS_METERS;
        assert!(d.is_finite());
        assert!((d - half_circumference).abs() < 1.0, "got {d}");
    }

    #[rstest]
    fn metric_delegates_to_haversine() {
        let a = point(51.5, -0.1);
        let b = point(48.85, 2.35);
        assert_eq!(Haversine.distance_meters(a, b), distance_meters(a, b));
    }

    #[rstest]
    fn london_to_paris_is_roughly_343_km() {
        let d = distance_meters(point(51.5074, -0.1278), point(48.8566, 2.3522));
        assert!((d - 343_500.0).abs() < 1_500.0, "got {d}");
    }
}
