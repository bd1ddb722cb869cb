#![cfg(feature = "range")]
//! Property-based tests for range traversal.
//!
//! ## Laws
//!
//! 1. **Boundary inclusion**: the produced values are exactly the stepped
//!    values between the endpoints, minus each open endpoint
//! 2. **Membership**: `contains` agrees with the produced sequence
//! 3. **Restartability**: every traversal produces the same sequence
//! 4. **Direction**: a step pointing away from the right endpoint is rejected

use functors::generator::Generator;
use functors::range::{BoundType, CharRange, Endpoint, Range};
use proptest::prelude::*;

fn bound_type() -> impl Strategy<Value = BoundType> {
    prop_oneof![Just(BoundType::Open), Just(BoundType::Closed)]
}

/// Reference model: every stepped value from `from` up to `to`, then the open
/// endpoints removed.
fn expected_ascending(
    from: i32,
    to: i32,
    step: i32,
    left: BoundType,
    right: BoundType,
) -> Vec<i32> {
    (from..=to)
        .step_by(usize::try_from(step).unwrap())
        .filter(|value| left == BoundType::Closed || *value != from)
        .filter(|value| right == BoundType::Closed || *value != to)
        .collect()
}

proptest! {
    #[test]
    fn prop_ascending_matches_reference_model(
        from in -200..200_i32,
        length in 0..200_i32,
        step in 1..20_i32,
        left in bound_type(),
        right in bound_type(),
    ) {
        let to = from + length;
        let range = Range::new(Endpoint::new(from, left), Endpoint::new(to, right), step).unwrap();
        prop_assert_eq!(range.to_collection(), expected_ascending(from, to, step, left, right));
    }

    #[test]
    fn prop_descending_mirrors_ascending(
        from in -200..200_i32,
        length in 1..200_i32,
        step in 1..20_i32,
        left in bound_type(),
        right in bound_type(),
    ) {
        let to = from - length;
        let descending = Range::new(Endpoint::new(from, left), Endpoint::new(to, right), -step).unwrap();
        let mirrored = Range::new(Endpoint::new(-from, left), Endpoint::new(-to, right), step).unwrap();
        let negated: Vec<i32> = mirrored.to_collection().into_iter().map(|value| -value).collect();
        prop_assert_eq!(descending.to_collection(), negated);
    }

    #[test]
    fn prop_contains_agrees_with_traversal(
        from in -100..100_i64,
        length in 0..100_i64,
        step in 1..10_i64,
        left in bound_type(),
        right in bound_type(),
        probe in -150..150_i64,
    ) {
        let range = Range::new(Endpoint::new(from, left), Endpoint::new(from + length, right), step).unwrap();
        let produced = range.to_collection();
        prop_assert_eq!(range.contains(probe), produced.contains(&probe));
        prop_assert_eq!(range.is_empty(), produced.is_empty());
    }

    #[test]
    fn prop_traversal_is_restartable(from in -50..50_i32, to in -50..50_i32) {
        let range = Range::between(from, to).unwrap();
        prop_assert_eq!(range.to_collection(), range.to_collection());
    }

    #[test]
    fn prop_step_pointing_away_is_rejected(
        from in -100..100_i32,
        length in 1..100_i32,
        step in 1..10_i32,
    ) {
        prop_assert!(Range::with_step(from, from + length, -step).is_err());
        prop_assert!(Range::with_step(from + length, from, step).is_err());
    }

    #[test]
    fn prop_char_range_length(start in 0x20_u32..0x7e, length in 0_u32..0x20) {
        let left = char::from_u32(start).unwrap();
        let right = char::from_u32((start + length).min(0x7e)).unwrap();
        let range = CharRange::between(left, right).unwrap();
        let expected = u32::from(right) - u32::from(left) + 1;
        prop_assert_eq!(range.to_collection().len(), usize::try_from(expected).unwrap());
    }
}
