//! Focused unit tests covering argument conversion and output formatting.

use super::*;
use crate::locations::{LocationsArgs, LocationsConfig};
use crate::nearby::{NearbyArgs, NearbyConfig};
use crate::output::write_json;
use crate::profile::{ProfileArgs, ProfileConfig};
use crate::rate::{RateArgs, RateConfig};
use rstest::rstest;
use soundmap_core::{DEFAULT_PROXIMITY_METERS, GeoPointError, Profile, RatingError};
use soundmap_data::DEFAULT_BASE_URL;

fn harbour_args() -> NearbyArgs {
    NearbyArgs {
        latitude: Some(54.3233),
        longitude: Some(10.1228),
        ..NearbyArgs::default()
    }
}

#[rstest]
#[case::latitude(ARG_LATITUDE, ENV_NEARBY_LATITUDE)]
#[case::longitude(ARG_LONGITUDE, ENV_NEARBY_LONGITUDE)]
fn nearby_requires_both_coordinates(
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let mut args = harbour_args();
    if expected_field == ARG_LATITUDE {
        args.latitude = None;
    } else {
        args.longitude = None;
    }

    let err = NearbyConfig::try_from(args).expect_err("missing coordinate should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn nearby_config_applies_defaults() {
    let config = NearbyConfig::try_from(harbour_args()).expect("config should build");
    assert_eq!(config.position.latitude(), 54.3233);
    assert_eq!(config.radius_meters, DEFAULT_PROXIMITY_METERS);
    assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
    assert_eq!(config.api_key, None);
    assert_eq!(config.store, Utf8PathBuf::from(DEFAULT_STORE_PATH));
}

#[rstest]
fn nearby_rejects_out_of_range_latitude() {
    let args = NearbyArgs {
        latitude: Some(91.0),
        ..harbour_args()
    };
    let err = NearbyConfig::try_from(args).expect_err("latitude 91 is invalid");
    match err {
        CliError::InvalidPosition(GeoPointError::InvalidLatitude { .. }) => {}
        other => panic!("expected InvalidPosition, found {other:?}"),
    }
}

#[rstest]
#[case::negative(-1.0)]
#[case::not_a_number(f64::NAN)]
#[case::infinite(f64::INFINITY)]
fn nearby_rejects_unusable_radius(#[case] radius: f64) {
    let args = NearbyArgs {
        radius_meters: Some(radius),
        ..harbour_args()
    };
    let err = NearbyConfig::try_from(args).expect_err("radius should be rejected");
    assert!(
        matches!(err, CliError::InvalidRadius { .. }),
        "expected InvalidRadius, found {err:?}"
    );
}

#[rstest]
fn nearby_accepts_a_zero_radius() {
    let args = NearbyArgs {
        radius_meters: Some(0.0),
        ..harbour_args()
    };
    let config = NearbyConfig::try_from(args).expect("zero radius is allowed");
    assert_eq!(config.radius_meters, 0.0);
}

#[rstest]
fn locations_position_is_optional() {
    let config = LocationsConfig::try_from(LocationsArgs::default()).expect("config should build");
    assert_eq!(config.position, None);
    assert_eq!(config.radius_meters, DEFAULT_PROXIMITY_METERS);
    assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
}

#[rstest]
#[case::latitude_only(Some(54.3233), None, ARG_LONGITUDE, ENV_LOCATIONS_LONGITUDE)]
#[case::longitude_only(None, Some(10.1228), ARG_LATITUDE, ENV_LOCATIONS_LATITUDE)]
fn locations_position_needs_both_coordinates(
    #[case] latitude: Option<f64>,
    #[case] longitude: Option<f64>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = LocationsArgs {
        latitude,
        longitude,
        ..LocationsArgs::default()
    };
    match LocationsConfig::try_from(args).expect_err("half a position is rejected") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn locations_rejects_a_negative_radius() {
    let args = LocationsArgs {
        radius_meters: Some(-5.0),
        ..LocationsArgs::default()
    };
    let err = LocationsConfig::try_from(args).expect_err("radius should be rejected");
    assert!(matches!(err, CliError::InvalidRadius { .. }));
}

#[rstest]
fn rate_requires_a_sample_id() {
    let args = RateArgs {
        value: Some(4),
        ..RateArgs::default()
    };
    let err = RateConfig::try_from(args).expect_err("missing sample id should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SAMPLE_ID);
            assert_eq!(env, ENV_RATE_SAMPLE_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::zero(0)]
#[case::six(6)]
#[case::negative(-3)]
fn rate_rejects_scores_outside_one_to_five(#[case] raw: i64) {
    let args = RateArgs {
        sample_id: Some(10),
        value: Some(raw),
        ..RateArgs::default()
    };
    let err = RateConfig::try_from(args).expect_err("score should be rejected");
    match err {
        CliError::InvalidRating(RatingError::OutOfRange { value }) => assert_eq!(value, raw),
        other => panic!("expected InvalidRating, found {other:?}"),
    }
}

#[rstest]
fn rate_config_carries_the_rating() {
    let args = RateArgs {
        sample_id: Some(10),
        value: Some(5),
        api_base_url: Some("http://catalogue.test".to_owned()),
        api_key: Some("test-key".to_owned()),
        store: Some(Utf8PathBuf::from("state/store.json")),
    };
    let config = RateConfig::try_from(args).expect("config should build");
    assert_eq!(config.rating.sample_id, 10);
    assert_eq!(config.rating.value.get(), 5);
    assert_eq!(config.api_base_url, "http://catalogue.test");
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.store, Utf8PathBuf::from("state/store.json"));
}

#[rstest]
fn profile_config_keeps_unset_fields_empty() {
    let args = ProfileArgs {
        name: Some("Ada".to_owned()),
        ..ProfileArgs::default()
    };
    let config = ProfileConfig::from(args);
    assert_eq!(
        config.update,
        Profile {
            name: Some("Ada".to_owned()),
            photo_uri: None,
        }
    );
}

#[rstest]
fn clear_photo_flag_reaches_the_config() {
    let cli = Cli::try_parse_from(["soundmap", "profile", "--clear-photo"])
        .expect("flag parses");
    let Command::Profile(args) = cli.command else {
        panic!("expected profile command");
    };
    let config = ProfileConfig::from(args);
    assert!(config.clear_photo);
    assert_eq!(config.update, Profile::default());
}

#[rstest]
fn clear_photo_conflicts_with_a_new_photo() {
    let err = Cli::try_parse_from([
        "soundmap",
        "profile",
        "--clear-photo",
        "--photo-uri",
        "file:///new.jpg",
    ])
    .map_err(CliError::from)
    .expect_err("flags conflict");
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
fn negative_coordinates_parse_as_values() {
    let cli = Cli::try_parse_from([
        "soundmap",
        "nearby",
        "--latitude",
        "-33.8568",
        "--longitude",
        "-151.2153",
    ])
    .expect("negative coordinates parse");
    match cli.command {
        Command::Nearby(args) => {
            assert_eq!(args.latitude, Some(-33.8568));
            assert_eq!(args.longitude, Some(-151.2153));
        }
        other => panic!("expected nearby command, found {other:?}"),
    }
}

#[rstest]
fn non_numeric_score_is_a_parse_error() {
    let err = Cli::try_parse_from(["soundmap", "rate", "--sample-id", "3", "--value", "five"])
        .map_err(CliError::from)
        .expect_err("score must be numeric");
    assert!(matches!(err, CliError::ArgumentParsing(_)));
}

#[rstest]
fn json_output_ends_with_a_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &Profile::default()).expect("write succeeds");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("}\n"), "unexpected output {text:?}");
    let decoded: Profile = serde_json::from_str(&text).expect("output is JSON");
    assert_eq!(decoded, Profile::default());
}
