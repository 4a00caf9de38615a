//! Audio samples and their location associations.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// An audio recording published to the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Opaque descriptor handed to the audio player.
    pub payload: String,
}

/// Links a sample to one of the locations it is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleLocation {
    /// Associated sample.
    pub sample_id: u64,
    /// Associated location.
    pub location_id: u64,
}

/// Identifiers of samples pinned to `location_id`.
///
/// Identifiers keep the order of `associations` and appear once even when the
/// association list repeats a pair.
///
/// # Examples
/// ```
/// use soundmap_core::{SampleLocation, samples_at};
///
/// let links = [
///     SampleLocation { sample_id: 4, location_id: 1 },
///     SampleLocation { sample_id: 9, location_id: 2 },
///     SampleLocation { sample_id: 2, location_id: 1 },
/// ];
/// assert_eq!(samples_at(1, &links), vec![4, 2]);
/// ```
#[must_use]
pub fn samples_at(location_id: u64, associations: &[SampleLocation]) -> Vec<u64> {
    let mut seen = HashSet::new();
    associations
        .iter()
        .filter(|link| link.location_id == location_id)
        .map(|link| link.sample_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
