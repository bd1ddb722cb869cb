//! Stepped numeric ranges.

use std::cmp::Ordering;
use std::fmt;
use std::ops::ControlFlow;

use num_traits::Num;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::endpoint::{BoundType, Endpoint};
use crate::error::FunctorError;
use crate::generator::Generator;

/// Numeric types a [`Range`] can step over.
pub trait RangeValue: Copy + PartialOrd + Num + fmt::Debug + fmt::Display {
    /// Returns `self + step`, or `None` when the sum leaves the type's domain.
    fn advance(self, step: Self) -> Option<Self>;

    /// The step used when none is given: one towards `to`. `None` when the
    /// type cannot represent a step in that direction.
    fn unit_step(from: Self, to: Self) -> Option<Self>;

    /// Returns `true` when `value` lies a whole number of steps away from
    /// `first`. `step` is never zero.
    fn is_whole_steps_from(first: Self, value: Self, step: Self) -> bool;
}

macro_rules! signed_range_value {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl RangeValue for $numeric {
                #[inline]
                fn advance(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }

                #[inline]
                fn unit_step(from: Self, to: Self) -> Option<Self> {
                    Some(if from <= to { 1 } else { -1 })
                }

                #[inline]
                fn is_whole_steps_from(first: Self, value: Self, step: Self) -> bool {
                    first.abs_diff(value) % step.unsigned_abs() == 0
                }
            }
        )*
    };
}

macro_rules! unsigned_range_value {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl RangeValue for $numeric {
                #[inline]
                fn advance(self, step: Self) -> Option<Self> {
                    self.checked_add(step)
                }

                #[inline]
                fn unit_step(from: Self, to: Self) -> Option<Self> {
                    (from <= to).then_some(1)
                }

                #[inline]
                fn is_whole_steps_from(first: Self, value: Self, step: Self) -> bool {
                    first.abs_diff(value) % step == 0
                }
            }
        )*
    };
}

macro_rules! float_range_value {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl RangeValue for $numeric {
                #[inline]
                fn advance(self, step: Self) -> Option<Self> {
                    Some(self + step)
                }

                #[inline]
                fn unit_step(from: Self, to: Self) -> Option<Self> {
                    Some(if from <= to { 1.0 } else { -1.0 })
                }

                #[inline]
                #[allow(clippy::float_cmp)]
                fn is_whole_steps_from(first: Self, value: Self, step: Self) -> bool {
                    (value - first) % step == 0.0
                }
            }
        )*
    };
}

signed_range_value!(i8, i16, i32, i64, i128, isize);
unsigned_range_value!(u8, u16, u32, u64, u128, usize);
float_range_value!(f32, f64);

/// An interval between two [`Endpoint`]s walked in fixed steps.
///
/// The step must point from the left value towards the right one; a range
/// that could never terminate is rejected at construction. Every traversal
/// walks the full interval again.
///
/// Values are produced by repeatedly adding the step, so floating-point
/// ranges accumulate rounding error exactly as a hand-written loop would.
///
/// # Examples
///
/// ```rust
/// use functors::generator::Generator;
/// use functors::range::{Endpoint, Range};
///
/// // Left closed, right open by default.
/// assert_eq!(Range::between(1, 5)?.to_collection(), vec![1, 2, 3, 4]);
/// assert_eq!(Range::between(5, 1)?.to_collection(), vec![5, 4, 3, 2]);
///
/// let odd = Range::new(Endpoint::open(0), Endpoint::closed(9), 3)?;
/// assert_eq!(odd.to_collection(), vec![3, 6, 9]);
///
/// assert!(Range::with_step(1, 10, -1).is_err());
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawRange<T>",
        bound(deserialize = "T: RangeValue + Deserialize<'de>")
    )
)]
pub struct Range<T> {
    left: Endpoint<T>,
    right: Endpoint<T>,
    step: T,
}

impl<T: RangeValue> Range<T> {
    /// Creates a range from explicit endpoints and step.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidRange`] when the endpoint values differ
    /// and the step does not point from `left` towards `right` (a zero or NaN
    /// step included).
    pub fn new(left: Endpoint<T>, right: Endpoint<T>, step: T) -> Result<Self, FunctorError> {
        let direction = left.value().partial_cmp(right.value());
        let step_direction = step.partial_cmp(&T::zero());
        let valid = match direction {
            Some(Ordering::Equal) => step_direction.is_some(),
            Some(ordering) => step_direction == Some(ordering.reverse()),
            None => false,
        };
        if !valid {
            return Err(FunctorError::InvalidRange {
                left: left.value().to_string(),
                right: right.value().to_string(),
                step: step.to_string(),
            });
        }
        Ok(Self { left, right, step })
    }

    /// Creates `[from, to)` with a unit step towards `to`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidRange`] for a descending range over an
    /// unsigned type.
    pub fn between(from: T, to: T) -> Result<Self, FunctorError> {
        let step = T::unit_step(from, to).ok_or_else(|| FunctorError::InvalidRange {
            left: from.to_string(),
            right: to.to_string(),
            step: "-1".to_string(),
        })?;
        Self::new(Endpoint::closed(from), Endpoint::open(to), step)
    }

    /// Creates `[from, to)` with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidRange`] when `step` cannot reach `to`.
    pub fn with_step(from: T, to: T, step: T) -> Result<Self, FunctorError> {
        Self::new(Endpoint::closed(from), Endpoint::open(to), step)
    }

    /// Returns the left endpoint.
    pub const fn left(&self) -> &Endpoint<T> {
        &self.left
    }

    /// Returns the right endpoint.
    pub const fn right(&self) -> &Endpoint<T> {
        &self.right
    }

    /// Returns the step.
    pub const fn step(&self) -> T {
        self.step
    }

    /// Returns `true` when a traversal produces no value.
    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    /// Returns `true` when `value` is one of the produced values, computed
    /// in closed form: within the bounds and a whole number of steps from
    /// the first value. Integer types compare absolute distances, so no
    /// overflow occurs at the type's bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use functors::range::Range;
    ///
    /// let range = Range::with_step(0, 10, 3)?;
    /// assert!(range.contains(9));
    /// assert!(!range.contains(10));
    /// assert!(!range.contains(4));
    /// # Ok::<(), functors::FunctorError>(())
    /// ```
    pub fn contains(&self, value: T) -> bool {
        let Some(first) = self.first() else {
            return false;
        };
        match self.direction() {
            None => value == first,
            Some(ascending) => {
                let after_first = if ascending { value >= first } else { value <= first };
                after_first
                    && self.before_right(value, ascending)
                    && T::is_whole_steps_from(first, value, self.step)
            }
        }
    }

    /// `Some(true)` ascending, `Some(false)` descending, `None` for a zero
    /// step over a single point.
    fn direction(&self) -> Option<bool> {
        match self.step.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Some(true),
            Some(Ordering::Less) => Some(false),
            _ => None,
        }
    }

    fn first(&self) -> Option<T> {
        let left = *self.left.value();
        let Some(ascending) = self.direction() else {
            let single = self.left.is_closed() && self.right.is_closed();
            return single.then_some(left);
        };
        let first = if self.left.is_closed() {
            left
        } else {
            left.advance(self.step)?
        };
        self.before_right(first, ascending).then_some(first)
    }

    fn before_right(&self, value: T, ascending: bool) -> bool {
        let right = *self.right.value();
        match (ascending, self.right.bound_type()) {
            (true, BoundType::Closed) => value <= right,
            (true, BoundType::Open) => value < right,
            (false, BoundType::Closed) => value >= right,
            (false, BoundType::Open) => value > right,
        }
    }
}

impl<T: RangeValue> Generator for Range<T> {
    type Item = T;

    fn generate<B, C>(&self, mut consumer: C) -> ControlFlow<B>
    where
        C: FnMut(T) -> ControlFlow<B>,
    {
        let Some(ascending) = self.direction() else {
            return match self.first() {
                Some(value) => consumer(value),
                None => ControlFlow::Continue(()),
            };
        };
        let mut current = if self.left.is_closed() {
            Some(*self.left.value())
        } else {
            self.left.value().advance(self.step)
        };
        while let Some(value) = current {
            if !self.before_right(value, ascending) {
                break;
            }
            if let ControlFlow::Break(value) = consumer(value) {
                return ControlFlow::Break(value);
            }
            current = value.advance(self.step);
        }
        ControlFlow::Continue(())
    }
}

impl<T: fmt::Display> fmt::Display for Range<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Range<{}, {}, {}>",
            self.left.left_display(),
            self.right.right_display(),
            self.step
        )
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawRange<T> {
    left: Endpoint<T>,
    right: Endpoint<T>,
    step: T,
}

#[cfg(feature = "serde")]
impl<T: RangeValue> TryFrom<RawRange<T>> for Range<T> {
    type Error = FunctorError;

    fn try_from(raw: RawRange<T>) -> Result<Self, Self::Error> {
        Self::new(raw.left, raw.right, raw.step)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Endpoint::closed(1), Endpoint::closed(3), vec![1, 2, 3])]
    #[case(Endpoint::open(1), Endpoint::closed(3), vec![2, 3])]
    #[case(Endpoint::open(1), Endpoint::open(3), vec![2])]
    #[case(Endpoint::closed(3), Endpoint::closed(1), vec![3, 2, 1])]
    #[case(Endpoint::open(3), Endpoint::open(1), vec![2])]
    fn test_bound_combinations(
        #[case] left: Endpoint<i32>,
        #[case] right: Endpoint<i32>,
        #[case] expected: Vec<i32>,
    ) {
        let step = if left.value() <= right.value() { 1 } else { -1 };
        let range = Range::new(left, right, step).unwrap();
        assert_eq!(range.to_collection(), expected);
    }

    #[test]
    fn test_integer_iteration_stops_at_type_bound() {
        let range = Range::new(Endpoint::closed(250_u8), Endpoint::closed(255), 3).unwrap();
        assert_eq!(range.to_collection(), vec![250, 253]);
    }

    #[test]
    fn test_zero_step_single_point() {
        let closed = Range::new(Endpoint::closed(4), Endpoint::closed(4), 0).unwrap();
        assert_eq!(closed.to_collection(), vec![4]);
        let half_open = Range::with_step(4, 4, 0).unwrap();
        assert!(half_open.is_empty());
    }

    #[test]
    fn test_zero_step_rejected_for_distinct_values() {
        assert!(matches!(
            Range::with_step(1, 2, 0),
            Err(FunctorError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_descending_unsigned_has_no_default_step() {
        assert!(Range::between(5_u32, 1).is_err());
    }

    #[test]
    fn test_nan_is_rejected() {
        assert!(Range::with_step(0.0, f64::NAN, 1.0).is_err());
        assert!(Range::with_step(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_float_range_accumulates() {
        let range = Range::with_step(0.0, 1.0, 0.1).unwrap();
        let values = range.to_collection();
        // 0.1 added ten times lands just below 1.0, so it is still produced.
        assert_eq!(values.len(), 11);
        assert!(values[10] < 1.0);
    }

    #[test]
    fn test_display() {
        let range = Range::between(1, 10).unwrap();
        assert_eq!(range.to_string(), "Range<[1, 10), 1>");
    }
}
