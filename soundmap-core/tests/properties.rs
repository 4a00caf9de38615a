//! Property-based tests for distance, proximity and rating aggregation.
//!
//! # Invariants tested
//!
//! - **Identity:** the distance from a point to itself is zero.
//! - **Symmetry:** `d(a, b)` equals `d(b, a)` within floating-point noise.
//! - **Bounds:** distances lie between zero and half the Earth's circumference.
//! - **First match:** a match is always the first qualifying candidate.
//! - **Order independence:** the average ignores rating order.
//! - **Cache round trip:** every valid rating reads back unchanged.
#![expect(
    clippy::float_arithmetic,
    reason = "properties compare floating-point distances"
)]
#![expect(clippy::expect_used, reason = "tests require concise failures")]

use std::f64::consts::PI;

use proptest::prelude::*;
use soundmap_core::{
    EARTH_MEAN_RADIUS_METERS, GeoPoint, Location, MemoryKeyValueStore, RatingCache, RatingValue,
    average, distance_meters, find_nearby,
};

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(latitude, longitude)| {
        GeoPoint::new(latitude, longitude).expect("strategy stays in range")
    })
}

fn rating_strategy() -> impl Strategy<Value = RatingValue> {
    (RatingValue::MIN..=RatingValue::MAX)
        .prop_map(|raw| RatingValue::new(raw).expect("strategy stays in range"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn distance_to_self_is_zero(point in point_strategy()) {
        prop_assert_eq!(distance_meters(point, point), 0.0);
    }

    #[test]
    fn distance_is_symmetric(a in point_strategy(), b in point_strategy()) {
        let there = distance_meters(a, b);
        let back = distance_meters(b, a);
        prop_assert!((there - back).abs() <= 1e-6 * there.max(1.0));
    }

    #[test]
    fn distance_is_bounded(a in point_strategy(), b in point_strategy()) {
        let distance = distance_meters(a, b);
        prop_assert!(distance.is_finite());
        prop_assert!(distance >= 0.0);
        prop_assert!(distance <= PI * EARTH_MEAN_RADIUS_METERS + 1.0);
    }

    #[test]
    fn match_is_first_qualifying_candidate(
        user in point_strategy(),
        positions in prop::collection::vec(point_strategy(), 0..12),
        max_distance in 0.0_f64..5_000_000.0,
    ) {
        let candidates: Vec<Location> = positions
            .into_iter()
            .zip(0_u64..)
            .map(|(position, id)| Location::new(id, format!("spot {id}"), position))
            .collect();
        let expected = candidates
            .iter()
            .find(|candidate| distance_meters(user, candidate.position) <= max_distance)
            .map(|candidate| candidate.id);

        let result = find_nearby(user, &candidates, max_distance);
        prop_assert_eq!(result.location().map(|location| location.id), expected);
    }

    #[test]
    fn average_ignores_order(mut values in prop::collection::vec(rating_strategy(), 0..40)) {
        let before = average(&values);
        values.reverse();
        prop_assert_eq!(average(&values), before);
        values.sort();
        prop_assert_eq!(average(&values), before);
    }

    #[test]
    fn average_stays_in_range(values in prop::collection::vec(rating_strategy(), 1..40)) {
        let mean = average(&values);
        prop_assert!((1.0..=5.0).contains(&mean));
    }

    #[test]
    fn cached_ratings_round_trip(sample_id in any::<u64>(), value in rating_strategy()) {
        let mut cache = RatingCache::new(MemoryKeyValueStore::default());
        cache.set_cached_rating(sample_id, value).expect("memory writes succeed");
        prop_assert_eq!(cache.cached_rating(sample_id), Ok(Some(value)));
    }
}
