//! Structural predicates: comparisons and logical composition.
//!
//! Unlike closures these values implement `PartialEq` and `Hash`, which is
//! what lets two generator pipelines built from equal parts compare equal.

use std::ops::Rem;

use num_traits::Zero;

use super::traits::Predicate;

/// Holds when the argument equals the stored value.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{IsEqual, Predicate};
///
/// assert!(IsEqual(4).test(&4));
/// assert!(!IsEqual(4).test(&5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsEqual<T>(pub T);

impl<T: PartialEq> Predicate<T> for IsEqual<T> {
    #[inline]
    fn test(&self, argument: &T) -> bool {
        *argument == self.0
    }
}

/// Holds when the argument is strictly greater than the stored bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsGreaterThan<T>(pub T);

impl<T: PartialOrd> Predicate<T> for IsGreaterThan<T> {
    #[inline]
    fn test(&self, argument: &T) -> bool {
        *argument > self.0
    }
}

/// Holds when the argument is strictly less than the stored bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsLessThan<T>(pub T);

impl<T: PartialOrd> Predicate<T> for IsLessThan<T> {
    #[inline]
    fn test(&self, argument: &T) -> bool {
        *argument < self.0
    }
}

/// Holds when the argument divides evenly by the stored divisor.
///
/// A zero divisor never holds.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{IsMultipleOf, Predicate};
///
/// let is_even = IsMultipleOf(2);
/// assert!(is_even.test(&8));
/// assert!(!is_even.test(&7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsMultipleOf<T>(pub T);

impl<T> Predicate<T> for IsMultipleOf<T>
where
    T: Copy + Zero + Rem<Output = T> + PartialEq,
{
    fn test(&self, argument: &T) -> bool {
        if self.0.is_zero() {
            return false;
        }
        (*argument % self.0).is_zero()
    }
}

/// Logical negation of the wrapped predicate.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{IsMultipleOf, Not, Predicate};
///
/// let is_odd = Not(IsMultipleOf(2));
/// assert!(is_odd.test(&3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Not<P>(pub P);

impl<A: ?Sized, P: Predicate<A>> Predicate<A> for Not<P> {
    #[inline]
    fn test(&self, argument: &A) -> bool {
        !self.0.test(argument)
    }
}

/// Short-circuiting conjunction; the left predicate is tested first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct And<P, Q>(pub P, pub Q);

impl<A: ?Sized, P: Predicate<A>, Q: Predicate<A>> Predicate<A> for And<P, Q> {
    #[inline]
    fn test(&self, argument: &A) -> bool {
        self.0.test(argument) && self.1.test(argument)
    }
}

/// Short-circuiting disjunction; the left predicate is tested first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Or<P, Q>(pub P, pub Q);

impl<A: ?Sized, P: Predicate<A>, Q: Predicate<A>> Predicate<A> for Or<P, Q> {
    #[inline]
    fn test(&self, argument: &A) -> bool {
        self.0.test(argument) || self.1.test(argument)
    }
}
