//! Aggregation functions.
//!
//! Two families, matching the two storage strategies:
//!
//! - [`SeriesFunction`]s compute a result from the whole stored series
//!   ([`Mean`], [`Median`], [`Max`], [`Sum`], [`Percentile`]). They return
//!   `None` for an empty series.
//! - [`FoldFunction`]s combine the running result with one new value
//!   ([`Count`], [`FoldSum`], [`FoldMax`], [`FoldMin`], [`CheckedSum`],
//!   [`Total`]). A failing fold reports an [`EvaluationError`].

use std::cmp::Ordering;
use std::fmt;

use num_traits::{CheckedAdd, FromPrimitive, Num};

use crate::error::{EvaluationError, FunctorError};
use crate::functor::BinaryFunction;

/// Numeric values the built-in aggregation functions accept.
///
/// Integer implementations never overflow: sums are checked and midpoints are
/// computed without an intermediate sum that could leave the type's domain.
pub trait AggregateValue:
    Copy + PartialOrd + Num + FromPrimitive + fmt::Display + Send + Sync + 'static
{
    /// Returns `self + other`, or `None` when the sum is not representable.
    fn checked_sum(self, other: Self) -> Option<Self>;

    /// Returns `(self + other) / 2`, rounded towards zero for integers.
    fn midpoint_of(self, other: Self) -> Self;
}

macro_rules! integer_aggregate_value {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl AggregateValue for $numeric {
                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    self.checked_add(other)
                }

                #[inline]
                fn midpoint_of(self, other: Self) -> Self {
                    // An overflowing sum implies equal signs, where halving
                    // each operand first loses at most the shared remainder.
                    match self.checked_add(other) {
                        Some(sum) => sum / 2,
                        None => self / 2 + other / 2 + (self % 2 + other % 2) / 2,
                    }
                }
            }
        )*
    };
}

macro_rules! float_aggregate_value {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl AggregateValue for $numeric {
                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    Some(self + other)
                }

                #[inline]
                fn midpoint_of(self, other: Self) -> Self {
                    self / 2.0 + other / 2.0
                }
            }
        )*
    };
}

integer_aggregate_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_aggregate_value!(f32, f64);

fn checked_total<T: AggregateValue>(series: &[T]) -> Option<T> {
    series
        .iter()
        .try_fold(T::zero(), |sum, value| sum.checked_sum(*value))
}

/// Computes an aggregate over a full series.
///
/// The series is handed over mutably so that order statistics may sort it in
/// place; implementations that do not need to must leave it untouched.
pub trait SeriesFunction<T> {
    /// Aggregates `series`, returning `None` when there is nothing to
    /// aggregate.
    fn apply(&self, series: &mut [T]) -> Option<T>;
}

impl<T, F> SeriesFunction<T> for F
where
    F: Fn(&mut [T]) -> Option<T>,
{
    #[inline]
    fn apply(&self, series: &mut [T]) -> Option<T> {
        self(series)
    }
}

/// Combines the running result with one new value.
pub trait FoldFunction<T> {
    /// Returns the result replacing `prior` once `value` is accounted for.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the value cannot be combined; the
    /// caller keeps `prior` in that case.
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError>;
}

impl<T, F> FoldFunction<T> for F
where
    F: Fn(&T, T) -> Result<T, EvaluationError>,
{
    #[inline]
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        self(prior, value)
    }
}

fn sort_values<T: PartialOrd>(values: &mut [T]) {
    values.sort_by(|left, right| left.partial_cmp(right).unwrap_or(Ordering::Equal));
}

/// Arithmetic mean. Integer types use integer division.
///
/// Returns `None` when the series is empty or when its integer sum overflows
/// the value type.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{Mean, SeriesFunction};
///
/// assert_eq!(Mean.apply(&mut [1.0, 2.0, 4.5]), Some(2.5));
/// assert_eq!(Mean.apply(&mut [1, 2]), Some(1));
/// assert_eq!(Mean.apply(&mut Vec::<f64>::new()), None);
/// assert_eq!(Mean.apply(&mut [i32::MAX, 1]), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Mean;

impl<T: AggregateValue> SeriesFunction<T> for Mean {
    fn apply(&self, series: &mut [T]) -> Option<T> {
        if series.is_empty() {
            return None;
        }
        let total = checked_total(series)?;
        Some(total / T::from_usize(series.len())?)
    }
}

/// Sum of the series; `None` when it is empty or the sum overflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sum;

impl<T: AggregateValue> SeriesFunction<T> for Sum {
    fn apply(&self, series: &mut [T]) -> Option<T> {
        if series.is_empty() {
            return None;
        }
        checked_total(series)
    }
}

/// Largest value of the series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Max;

impl<T: AggregateValue> SeriesFunction<T> for Max {
    fn apply(&self, series: &mut [T]) -> Option<T> {
        let (first, rest) = series.split_first()?;
        Some(
            rest.iter()
                .fold(*first, |best, value| if *value > best { *value } else { best }),
        )
    }
}

/// Median of the series; an even count averages the two middle values.
///
/// With `use_copy` the series is copied before sorting. Without it the series
/// itself is sorted in place, which is observable by whoever owns it.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{Median, SeriesFunction};
///
/// let mut values = vec![10, 1000, 30, 100];
/// assert_eq!(Median::copying().apply(&mut values), Some(65));
/// assert_eq!(values, vec![10, 1000, 30, 100]);
///
/// assert_eq!(Median::in_place().apply(&mut values), Some(65));
/// assert_eq!(values, vec![10, 30, 100, 1000]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Median {
    use_copy: bool,
}

impl Median {
    /// Creates a median function; `use_copy` selects the copy-first strategy.
    pub const fn new(use_copy: bool) -> Self {
        Self { use_copy }
    }

    /// Sorts a copy, leaving the series untouched.
    pub const fn copying() -> Self {
        Self::new(true)
    }

    /// Sorts the series in place.
    pub const fn in_place() -> Self {
        Self::new(false)
    }

    /// Returns `true` when the copy-first strategy is used.
    pub const fn use_copy(&self) -> bool {
        self.use_copy
    }
}

impl Default for Median {
    fn default() -> Self {
        Self::copying()
    }
}

impl<T: AggregateValue> SeriesFunction<T> for Median {
    fn apply(&self, series: &mut [T]) -> Option<T> {
        if series.is_empty() {
            return None;
        }
        if self.use_copy {
            let mut copy = series.to_vec();
            sort_values(&mut copy);
            Some(median_of_sorted(&copy))
        } else {
            sort_values(series);
            Some(median_of_sorted(series))
        }
    }
}

fn median_of_sorted<T: AggregateValue>(sorted: &[T]) -> T {
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[middle]
    } else {
        sorted[middle - 1].midpoint_of(sorted[middle])
    }
}

/// The value at a given percentile of the series.
///
/// The series is sorted (in place or on a copy, as for [`Median`]) and the
/// element at index `floor(percentile / 100 * (len - 1))` is returned, so
/// `0` yields the minimum and `100` the maximum.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{Percentile, SeriesFunction};
///
/// let p90 = Percentile::new(90.0, true)?;
/// let mut latencies: Vec<u32> = (1..=11).rev().collect();
/// assert_eq!(p90.apply(&mut latencies), Some(10));
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentile {
    percentile: f64,
    use_copy: bool,
}

impl Percentile {
    /// Creates a percentile function.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidArgument`] unless
    /// `0.0 <= percentile <= 100.0`.
    pub fn new(percentile: f64, use_copy: bool) -> Result<Self, FunctorError> {
        if !(0.0..=100.0).contains(&percentile) {
            return Err(FunctorError::InvalidArgument {
                argument: "percentile",
                reason: format!("expected a value between 0 and 100, got {percentile}"),
            });
        }
        Ok(Self {
            percentile,
            use_copy,
        })
    }

    /// Returns the requested percentile.
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn index_for(&self, length: usize) -> usize {
        let position = (self.percentile / 100.0) * (length - 1) as f64;
        (position.floor() as usize).min(length - 1)
    }
}

impl<T: AggregateValue> SeriesFunction<T> for Percentile {
    fn apply(&self, series: &mut [T]) -> Option<T> {
        if series.is_empty() {
            return None;
        }
        let index = self.index_for(series.len());
        if self.use_copy {
            let mut copy = series.to_vec();
            sort_values(&mut copy);
            copy.get(index).copied()
        } else {
            sort_values(series);
            series.get(index).copied()
        }
    }
}

/// Counts additions, ignoring the added values.
///
/// Fails once the count no longer fits the value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Count;

impl<T: AggregateValue> FoldFunction<T> for Count {
    #[inline]
    fn fold(&self, prior: &T, _value: T) -> Result<T, EvaluationError> {
        prior
            .checked_sum(T::one())
            .ok_or_else(|| EvaluationError::new(format!("count overflowed at {prior}")))
    }
}

/// Running sum; fails instead of overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FoldSum;

impl<T: AggregateValue> FoldFunction<T> for FoldSum {
    #[inline]
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        prior
            .checked_sum(value)
            .ok_or_else(|| EvaluationError::new(format!("{prior} + {value} overflowed")))
    }
}

/// Running maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FoldMax;

impl<T: AggregateValue> FoldFunction<T> for FoldMax {
    #[inline]
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        Ok(if value > *prior { value } else { *prior })
    }
}

/// Running minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FoldMin;

impl<T: AggregateValue> FoldFunction<T> for FoldMin {
    #[inline]
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        Ok(if value < *prior { value } else { *prior })
    }
}

/// Running sum that fails instead of overflowing, for any [`CheckedAdd`]
/// type (including ones outside [`AggregateValue`]).
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{CheckedSum, FoldFunction};
///
/// assert_eq!(CheckedSum.fold(&120_i8, 7).ok(), Some(127));
/// assert!(CheckedSum.fold(&120_i8, 8).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CheckedSum;

impl<T: CheckedAdd + std::fmt::Display> FoldFunction<T> for CheckedSum {
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        prior
            .checked_add(&value)
            .ok_or_else(|| EvaluationError::new(format!("{prior} + {value} overflowed")))
    }
}

/// Lifts an infallible binary function `(prior, value) -> result` into a
/// [`FoldFunction`].
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{FoldFunction, Total};
///
/// let concatenate = Total(|prior: String, value: String| prior + &value);
/// let folded = concatenate.fold(&"ab".to_string(), "cd".to_string());
/// assert_eq!(folded.ok(), Some("abcd".to_string()));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Total<F>(pub F);

impl<T, F> FoldFunction<T> for Total<F>
where
    T: Clone,
    F: BinaryFunction<T, T, Output = T>,
{
    #[inline]
    fn fold(&self, prior: &T, value: T) -> Result<T, EvaluationError> {
        Ok(self.0.evaluate(prior.clone(), value))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 1)]
    #[case(50.0, 3)]
    #[case(100.0, 5)]
    fn test_percentile_bounds(#[case] percentile: f64, #[case] expected: i32) {
        let function = Percentile::new(percentile, true).unwrap();
        assert_eq!(function.apply(&mut [5, 1, 4, 2, 3]), Some(expected));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn test_percentile_rejects_out_of_domain(#[case] percentile: f64) {
        assert!(matches!(
            Percentile::new(percentile, false),
            Err(FunctorError::InvalidArgument { argument: "percentile", .. })
        ));
    }

    #[test]
    fn test_empty_series_yields_none() {
        let mut empty: Vec<f64> = Vec::new();
        assert_eq!(Mean.apply(&mut empty), None);
        assert_eq!(Sum.apply(&mut empty), None);
        assert_eq!(Max.apply(&mut empty), None);
        assert_eq!(Median::in_place().apply(&mut empty), None);
    }

    #[test]
    fn test_max_with_negative_values() {
        assert_eq!(Max.apply(&mut [-5, -2, -9]), Some(-2));
    }

    #[test]
    fn test_fold_max_and_min() {
        assert_eq!(FoldMax.fold(&3, 7).ok(), Some(7));
        assert_eq!(FoldMax.fold(&3, 1).ok(), Some(3));
        assert_eq!(FoldMin.fold(&3, 1).ok(), Some(1));
    }

    #[rstest]
    #[case(vec![200_u8, 100], 150)]
    #[case(vec![255_u8, 255], 255)]
    #[case(vec![254_u8, 255], 254)]
    fn test_median_of_large_unsigned_pair(#[case] mut values: Vec<u8>, #[case] expected: u8) {
        assert_eq!(Median::in_place().apply(&mut values), Some(expected));
    }

    #[rstest]
    #[case(i32::MAX, i32::MAX - 2, i32::MAX - 1)]
    #[case(i32::MIN, i32::MIN + 3, i32::MIN + 2)]
    #[case(-3, 4, 0)]
    fn test_signed_midpoint_rounds_towards_zero(
        #[case] left: i32,
        #[case] right: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(left.midpoint_of(right), expected);
        assert_eq!(Median::copying().apply(&mut [left, right]), Some(expected));
    }

    #[test]
    fn test_overflowing_series_yields_none() {
        assert_eq!(Mean.apply(&mut [i32::MAX, 1]), None);
        assert_eq!(Sum.apply(&mut [u8::MAX, 1]), None);
        assert_eq!(Mean.apply(&mut [i32::MAX, -1]), Some(i32::MAX / 2));
    }

    #[test]
    fn test_count_and_fold_sum_fail_instead_of_overflowing() {
        assert_eq!(Count.fold(&254_u8, 0).ok(), Some(255));
        let error = Count.fold(&255_u8, 0).unwrap_err();
        assert_eq!(error.message(), "count overflowed at 255");
        assert!(FoldSum.fold(&i16::MIN, -1).is_err());
        assert_eq!(FoldSum.fold(&1.5_f64, 2.0).ok(), Some(3.5));
    }

    #[test]
    fn test_closure_series_function() {
        let range = |series: &mut [i32]| {
            let max = series.iter().max()?;
            let min = series.iter().min()?;
            Some(max - min)
        };
        assert_eq!(range.apply(&mut [4, 9, 1]), Some(8));
    }
}
