//! Named places published by the catalogue.

use crate::GeoPoint;

/// A named place that samples can be pinned to.
///
/// Locations are owned by the remote catalogue; clients hold a read-only
/// snapshot per session and compare identifiers by equality only.
///
/// # Examples
/// ```
/// use soundmap_core::{GeoPoint, Location};
///
/// # fn main() -> Result<(), soundmap_core::GeoPointError> {
/// let quay = Location::new(7, "Quay", GeoPoint::new(54.32, 10.14)?);
/// assert_eq!(quay.id, 7);
/// assert_eq!(quay.name, "Quay");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Validated position.
    pub position: GeoPoint,
}

impl Location {
    /// Construct a `Location`.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_accepts_borrowed_names() {
        let position = GeoPoint::new(1.0, 2.0).expect("valid point");
        let location = Location::new(3, "Pier", position);
        assert_eq!(location.name, "Pier");
        assert_eq!(location.position, position);
    }
}
