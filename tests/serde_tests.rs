#![cfg(all(feature = "serde", feature = "range", feature = "aggregator"))]
//! Serialization of ranges and timer configuration.

use functors::aggregator::TimerConfig;
use functors::generator::Generator;
use functors::range::{BoundType, Endpoint, Range};
use rstest::rstest;

#[rstest]
fn test_range_round_trips_through_json() {
    let range = Range::new(Endpoint::open(0), Endpoint::closed(9), 3).unwrap();
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(
        json,
        r#"{"left":{"value":0,"bound_type":"open"},"right":{"value":9,"bound_type":"closed"},"step":3}"#
    );
    let restored: Range<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, range);
    assert_eq!(restored.to_collection(), vec![3, 6, 9]);
}

#[rstest]
fn test_deserializing_unreachable_range_fails() {
    let json = r#"{"left":{"value":0,"bound_type":"closed"},"right":{"value":9,"bound_type":"open"},"step":-1}"#;
    let error = serde_json::from_str::<Range<i32>>(json).unwrap_err();
    assert!(error.to_string().contains("invalid range"));
}

#[rstest]
fn test_bound_type_uses_snake_case() {
    assert_eq!(serde_json::to_string(&BoundType::Closed).unwrap(), r#""closed""#);
}

#[rstest]
fn test_timer_config_defaults_missing_fields() {
    let config: TimerConfig = serde_json::from_str(r#"{"interval_millis":250}"#).unwrap();
    assert_eq!(config, TimerConfig::every_millis(250));

    let empty: TimerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.interval_millis, 0);
    assert!(!empty.use_shared_timer);
}
