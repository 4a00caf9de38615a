//! Rating values and submissions.

use std::str::FromStr;

use thiserror::Error;

/// Errors raised when building a [`RatingValue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    /// The value fell outside `1..=5`.
    #[error("rating {value} is outside 1..=5")]
    OutOfRange {
        /// Rejected value.
        value: i64,
    },
    /// The text could not be read as an integer.
    #[error("rating {raw:?} is not an integer")]
    NotANumber {
        /// Rejected text.
        raw: String,
    },
}

/// A single score in the inclusive range `1..=5`.
///
/// # Examples
/// ```
/// use soundmap_core::RatingValue;
///
/// # fn main() -> Result<(), soundmap_core::RatingError> {
/// let four = RatingValue::new(4)?;
/// assert_eq!(four.get(), 4);
/// assert!(RatingValue::new(0).is_err());
/// assert_eq!("5".parse::<RatingValue>()?.get(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "i64", into = "u8"))]
pub struct RatingValue(u8);

impl RatingValue {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 5;

    /// Validate and wrap a score.
    ///
    /// # Errors
    /// Returns [`RatingError::OutOfRange`] outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange {
                value: i64::from(value),
            })
        }
    }

    /// The wrapped score.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RatingValue {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for RatingValue {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let narrow = u8::try_from(value).map_err(|_| RatingError::OutOfRange { value })?;
        Self::new(narrow)
    }
}

impl From<RatingValue> for u8 {
    fn from(value: RatingValue) -> Self {
        value.0
    }
}

impl FromStr for RatingValue {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed: i64 = s.trim().parse().map_err(|_| RatingError::NotANumber {
            raw: s.to_owned(),
        })?;
        Self::try_from(parsed)
    }
}

impl std::fmt::Display for RatingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user's score for a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rating {
    /// Rated sample.
    pub sample_id: u64,
    /// Submitted score.
    pub value: RatingValue,
}

impl Rating {
    /// Construct a rating for `sample_id`.
    #[must_use]
    pub const fn new(sample_id: u64, value: RatingValue) -> Self {
        Self { sample_id, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_scores_in_range(#[case] value: u8) {
        assert_eq!(RatingValue::new(value).map(RatingValue::get), Ok(value));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(255)]
    fn rejects_scores_out_of_range(#[case] value: u8) {
        assert_eq!(
            RatingValue::new(value),
            Err(RatingError::OutOfRange {
                value: i64::from(value)
            })
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(256)]
    fn wide_integers_outside_u8_are_out_of_range(#[case] value: i64) {
        assert_eq!(
            RatingValue::try_from(value),
            Err(RatingError::OutOfRange { value })
        );
    }

    #[rstest]
    #[case(" 4 ", Ok(4))]
    #[case("four", Err(RatingError::NotANumber { raw: "four".into() }))]
    #[case("4.5", Err(RatingError::NotANumber { raw: "4.5".into() }))]
    #[case("9", Err(RatingError::OutOfRange { value: 9 }))]
    fn parses_text(#[case] raw: &str, #[case] expected: Result<u8, RatingError>) {
        assert_eq!(raw.parse::<RatingValue>().map(RatingValue::get), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_rejects_out_of_range_values() {
        let ok: Rating = serde_json::from_str(r#"{"sample_id":1,"value":5}"#).expect("valid");
        assert_eq!(ok.value.get(), 5);
        assert!(serde_json::from_str::<Rating>(r#"{"sample_id":1,"value":0}"#).is_err());
    }
}
