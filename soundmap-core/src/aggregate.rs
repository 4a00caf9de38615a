//! Summarise the ratings submitted for a sample.
//!
//! Aggregation is recomputed from the full rating list on every fetch; there
//! is no running mean. Scores are summed as integers, so the result does not
//! depend on the order ratings arrive in.

use crate::RatingValue;

/// Arithmetic mean of `values`, or `None` when there are no ratings.
///
/// # Examples
/// ```
/// use soundmap_core::{RatingValue, mean};
///
/// # fn main() -> Result<(), soundmap_core::RatingError> {
/// let values = [RatingValue::new(2)?, RatingValue::new(5)?];
/// assert_eq!(mean(&values), Some(3.5));
/// assert_eq!(mean(&[]), None);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging divides an integer sum by the rating count"
)]
pub fn mean(values: &[RatingValue]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: u64 = values.iter().map(|value| u64::from(value.get())).sum();
    Some(total as f64 / values.len() as f64)
}

/// Arithmetic mean of `values`, collapsing "no ratings" to `0.0`.
///
/// Callers that must tell an unrated sample apart from a low score should
/// check for emptiness first or use [`mean`].
///
/// # Examples
/// ```
/// use soundmap_core::{RatingValue, average};
///
/// # fn main() -> Result<(), soundmap_core::RatingError> {
/// let values: Vec<RatingValue> = (1..=5)
///     .map(RatingValue::new)
///     .collect::<Result<_, _>>()?;
/// assert_eq!(average(&values), 3.0);
/// assert_eq!(average(&[]), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn average(values: &[RatingValue]) -> f64 {
    mean(values).unwrap_or(0.0)
}

/// Display-ready rating information for one sample.
///
/// `mine` is the user's locally cached score. It is shown next to the
/// computed average and never folded into it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingSummary {
    /// Mean of all submitted ratings, `None` when unrated.
    pub average: Option<f64>,
    /// Number of submitted ratings.
    pub count: usize,
    /// The user's own cached rating, if any.
    pub mine: Option<RatingValue>,
}

impl RatingSummary {
    /// Summarise `values` alongside the cached `mine` score.
    #[must_use]
    pub fn new(values: &[RatingValue], mine: Option<RatingValue>) -> Self {
        Self {
            average: mean(values),
            count: values.len(),
            mine,
        }
    }

    /// The average with "unrated" shown as `0.0`.
    #[must_use]
    pub fn display_average(&self) -> f64 {
        self.average.unwrap_or(0.0)
    }

    /// Whether any rating has been submitted.
    #[must_use]
    pub const fn is_rated(&self) -> bool {
        self.count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn values(raw: &[u8]) -> Vec<RatingValue> {
        raw.iter()
            .map(|v| RatingValue::new(*v).expect("test ratings are in range"))
            .collect()
    }

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&[5], 5.0)]
    #[case(&[1, 2, 3, 4, 5], 3.0)]
    #[case(&[4, 5], 4.5)]
    fn averages_scores(#[case] raw: &[u8], #[case] expected: f64) {
        assert_eq!(average(&values(raw)), expected);
    }

    #[rstest]
    fn mean_distinguishes_unrated() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&values(&[1])), Some(1.0));
    }

    #[rstest]
    fn summary_keeps_my_rating_separate() {
        let mine = RatingValue::new(1).ok();
        let summary = RatingSummary::new(&values(&[5, 5]), mine);
        assert_eq!(summary.average, Some(5.0));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mine, mine);
    }

    #[rstest]
    fn unrated_summary_displays_zero() {
        let summary = RatingSummary::new(&[], None);
        assert!(!summary.is_rated());
        assert_eq!(summary.average, None);
        assert_eq!(summary.display_average(), 0.0);
    }
}
