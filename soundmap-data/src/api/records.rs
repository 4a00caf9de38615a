//! Wire records for the sample catalogue's REST endpoints.
//!
//! The service is loose about numeric fields: ids, coordinates and scores may
//! arrive as JSON numbers or as numeric strings. Records decode both forms
//! and are then normalised into validated core types. A value that cannot be
//! normalised fails the whole response with [`CatalogueError::InvalidRecord`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use soundmap_core::{
    CatalogueError, GeoPoint, Location, Rating, RatingValue, Sample, SampleLocation,
};

/// A JSON number or a string expected to hold one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    fn as_u64(&self, record: &'static str, field: &str) -> Result<u64, CatalogueError> {
        let parsed = match self {
            Self::Number(number) => number.as_u64(),
            Self::Text(text) => text.trim().parse().ok(),
        };
        parsed.ok_or_else(|| invalid(record, format!("{field} {self} is not an id")))
    }

    /// Integers, plus floats and numeric strings with no fractional part
    /// (`4.0`, `"4.0"`).
    fn as_i64(&self, record: &'static str, field: &str) -> Result<i64, CatalogueError> {
        let parsed = match self {
            Self::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(whole_number)),
            Self::Text(text) => {
                let trimmed = text.trim();
                trimmed
                    .parse()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_number))
            }
        };
        parsed.ok_or_else(|| invalid(record, format!("{field} {self} is not an integer")))
    }

    fn as_f64(&self, record: &'static str, field: &str) -> Result<f64, CatalogueError> {
        let parsed = match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => text.trim().parse().ok(),
        };
        parsed
            .filter(|value: &f64| value.is_finite())
            .ok_or_else(|| invalid(record, format!("{field} {self} is not a number")))
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Bound below 2^53, inside which every whole `f64` is exact.
const MAX_WHOLE_FLOAT: f64 = 9_000_000_000_000_000.0;

#[expect(
    clippy::cast_possible_truncation,
    reason = "only whole values well inside the i64 range reach the cast"
)]
fn whole_number(value: f64) -> Option<i64> {
    let whole = value.fract() == 0.0 && (-MAX_WHOLE_FLOAT..=MAX_WHOLE_FLOAT).contains(&value);
    whole.then(|| value as i64)
}

fn invalid(record: &'static str, message: String) -> CatalogueError {
    CatalogueError::InvalidRecord { record, message }
}

/// `GET location/` item.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LocationRecord {
    pub(crate) id: Numeric,
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) latitude: Numeric,
    pub(crate) longitude: Numeric,
}

impl TryFrom<LocationRecord> for Location {
    type Error = CatalogueError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        const RECORD: &str = "location";
        let id = record.id.as_u64(RECORD, "id")?;
        let latitude = record.latitude.as_f64(RECORD, "latitude")?;
        let longitude = record.longitude.as_f64(RECORD, "longitude")?;
        let position = GeoPoint::new(latitude, longitude)
            .map_err(|err| invalid(RECORD, format!("location {id}: {err}")))?;
        Ok(Self::new(id, record.name, position))
    }
}

/// `GET sample/` item.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SampleRecord {
    pub(crate) id: Numeric,
    #[serde(default)]
    pub(crate) name: String,
    pub(crate) datetime: String,
    #[serde(default)]
    pub(crate) recording_data: String,
}

/// Accept RFC 3339, or a naive ISO 8601 timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(stamped) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamped.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
}

impl TryFrom<SampleRecord> for Sample {
    type Error = CatalogueError;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        const RECORD: &str = "sample";
        let id = record.id.as_u64(RECORD, "id")?;
        let created_at = parse_timestamp(&record.datetime).ok_or_else(|| {
            invalid(
                RECORD,
                format!("sample {id}: datetime {:?} is not a timestamp", record.datetime),
            )
        })?;
        Ok(Self {
            id,
            name: record.name,
            created_at,
            payload: record.recording_data,
        })
    }
}

/// `GET sampletolocation/` item.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SampleLocationRecord {
    pub(crate) sample_id: Numeric,
    pub(crate) location_id: Numeric,
}

impl TryFrom<SampleLocationRecord> for SampleLocation {
    type Error = CatalogueError;

    fn try_from(record: SampleLocationRecord) -> Result<Self, Self::Error> {
        const RECORD: &str = "sample-location";
        Ok(Self {
            sample_id: record.sample_id.as_u64(RECORD, "sample_id")?,
            location_id: record.location_id.as_u64(RECORD, "location_id")?,
        })
    }
}

/// `GET samplerating/?sample_id={id}` item.
///
/// `sample_id` may be omitted because the query already names the sample.
/// The service may also answer with ratings for other samples; those keep
/// their own id so the resolver can discard them.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RatingRecord {
    #[serde(default)]
    pub(crate) sample_id: Option<Numeric>,
    pub(crate) rating: Numeric,
}

impl RatingRecord {
    pub(crate) fn into_rating(self, requested: u64) -> Result<Rating, CatalogueError> {
        const RECORD: &str = "rating";
        let sample_id = match &self.sample_id {
            Some(raw) => raw.as_u64(RECORD, "sample_id")?,
            None => requested,
        };
        let raw_value = self.rating.as_i64(RECORD, "rating")?;
        let value = RatingValue::try_from(raw_value)
            .map_err(|err| invalid(RECORD, format!("sample {sample_id}: {err}")))?;
        Ok(Rating::new(sample_id, value))
    }
}

/// `POST samplerating/` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct RatingSubmission<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) api_key: Option<&'a str>,
    pub(crate) sample_id: u64,
    pub(crate) rating: u8,
}

impl<'a> RatingSubmission<'a> {
    pub(crate) const fn new(rating: &Rating, api_key: Option<&'a str>) -> Self {
        Self {
            api_key,
            sample_id: rating.sample_id,
            rating: rating.value.get(),
        }
    }
}

/// Normalise every record, failing on the first invalid one.
pub(crate) fn normalise<R, T>(records: Vec<R>) -> Result<Vec<T>, CatalogueError>
where
    T: TryFrom<R, Error = CatalogueError>,
{
    records.into_iter().map(T::try_from).collect()
}
