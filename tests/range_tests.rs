#![cfg(feature = "range")]
//! Integration tests for numeric and character ranges.

use functors::FunctorError;
use functors::generator::Generator;
use functors::range::{BoundType, CharRange, Endpoint, Range};
use rstest::rstest;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_default_bounds_are_closed_open() {
    let range = Range::between(1, 10).unwrap();
    assert_eq!(range.left().bound_type(), BoundType::Closed);
    assert_eq!(range.right().bound_type(), BoundType::Open);
    assert_eq!(range.step(), 1);
    assert_eq!(range.to_collection(), (1..=9).collect::<Vec<_>>());
}

#[rstest]
#[case(1, 10, -1)]
#[case(10, 1, 1)]
#[case(1, 10, 0)]
fn test_unreachable_right_endpoint_is_rejected(
    #[case] from: i64,
    #[case] to: i64,
    #[case] step: i64,
) {
    let error = Range::with_step(from, to, step).unwrap_err();
    assert!(matches!(error, FunctorError::InvalidRange { .. }));
    assert!(error.to_string().contains(&format!("step {step}")));
}

#[rstest]
fn test_equal_endpoints_accept_any_step() {
    assert!(Range::with_step(3, 3, -5).unwrap().is_empty());
    let point = Range::new(Endpoint::closed(3), Endpoint::closed(3), 7).unwrap();
    assert_eq!(point.to_collection(), vec![3]);
}

// =============================================================================
// Traversal
// =============================================================================

#[rstest]
#[case(BoundType::Closed, BoundType::Closed, vec![0, 5, 10, 15, 20])]
#[case(BoundType::Closed, BoundType::Open, vec![0, 5, 10, 15])]
#[case(BoundType::Open, BoundType::Closed, vec![5, 10, 15, 20])]
#[case(BoundType::Open, BoundType::Open, vec![5, 10, 15])]
fn test_ascending_bound_types(
    #[case] left: BoundType,
    #[case] right: BoundType,
    #[case] expected: Vec<i32>,
) {
    let range = Range::new(Endpoint::new(0, left), Endpoint::new(20, right), 5).unwrap();
    assert_eq!(range.to_collection(), expected);
}

#[rstest]
#[case(BoundType::Closed, BoundType::Closed, vec![20, 15, 10, 5, 0])]
#[case(BoundType::Open, BoundType::Open, vec![15, 10, 5])]
fn test_descending_bound_types(
    #[case] left: BoundType,
    #[case] right: BoundType,
    #[case] expected: Vec<i32>,
) {
    let range = Range::new(Endpoint::new(20, left), Endpoint::new(0, right), -5).unwrap();
    assert_eq!(range.to_collection(), expected);
}

#[rstest]
fn test_step_not_dividing_interval() {
    let range = Range::with_step(0, 10, 4).unwrap();
    assert_eq!(range.to_collection(), vec![0, 4, 8]);
    assert!(range.contains(8));
    assert!(!range.contains(10));
    assert!(!range.contains(12));
}

#[rstest]
#[case(i32::MIN, i32::MAX, 1, i32::MAX - 1, true)]
#[case(i32::MIN, i32::MAX, 2, i32::MAX - 2, false)]
#[case(i32::MIN, i32::MAX, i32::MAX, i32::MAX - 1, true)]
#[case(i32::MAX, i32::MIN, -3, i32::MIN + 3, true)]
#[case(i32::MAX, i32::MIN, i32::MIN, -1, true)]
fn test_contains_at_type_bounds(
    #[case] from: i32,
    #[case] to: i32,
    #[case] step: i32,
    #[case] probe: i32,
    #[case] expected: bool,
) {
    let range = Range::with_step(from, to, step).unwrap();
    assert_eq!(range.contains(probe), expected);
}

#[rstest]
fn test_contains_closed_minimum_with_negative_unit_step() {
    let range = Range::new(Endpoint::closed(0), Endpoint::closed(i32::MIN), -1).unwrap();
    assert!(range.contains(i32::MIN));
    assert!(!range.contains(1));

    let unsigned = Range::new(Endpoint::closed(0_u64), Endpoint::closed(u64::MAX), 5).unwrap();
    assert!(unsigned.contains(u64::MAX));
    assert!(!unsigned.contains(u64::MAX - 1));
}

#[rstest]
fn test_range_is_restartable() {
    let range = Range::with_step(10, 0, -3).unwrap();
    assert_eq!(range.to_collection(), range.to_collection());
}

#[rstest]
fn test_stops_at_type_bound_without_overflow() {
    let range = Range::new(Endpoint::closed(i8::MAX - 2), Endpoint::closed(i8::MAX), 2).unwrap();
    assert_eq!(range.to_collection(), vec![125, 127]);

    let descending = Range::new(Endpoint::closed(1_u16), Endpoint::closed(0), 0_u16);
    assert!(descending.is_err());
}

#[rstest]
fn test_float_range_uses_accumulation() {
    let range = Range::with_step(0.0_f64, 0.3, 0.1).unwrap();
    let produced = range.to_collection();
    // 0.1 + 0.1 + 0.1 lands just above 0.3 and is excluded.
    let expected = vec![0.0, 0.1, 0.1 + 0.1];
    assert_eq!(produced, expected);
}

#[rstest]
fn test_display_renders_bounds() {
    let range = Range::new(Endpoint::open(0.5), Endpoint::closed(2.5), 0.5).unwrap();
    assert_eq!(range.to_string(), "Range<(0.5, 2.5], 0.5>");
}

// =============================================================================
// CharRange
// =============================================================================

#[rstest]
fn test_char_range_closed_on_both_ends() {
    let digits: String = CharRange::between('0', '9')
        .unwrap()
        .to_collection()
        .into_iter()
        .collect();
    assert_eq!(digits, "0123456789");
}

#[rstest]
fn test_char_range_descending() {
    let range = CharRange::between('c', 'a').unwrap();
    assert_eq!(range.to_collection(), vec!['c', 'b', 'a']);
    assert_eq!(range.to_string(), "CharRange<[c, a], -1>");
}

#[rstest]
fn test_char_range_contains() {
    let vowels_step = CharRange::with_step('a', 'z', 4).unwrap();
    assert!(vowels_step.contains('e'));
    assert!(!vowels_step.contains('f'));
}

#[rstest]
fn test_char_range_rejects_wrong_direction() {
    assert!(matches!(
        CharRange::with_step('z', 'a', 1),
        Err(FunctorError::InvalidRange { .. })
    ));
}
