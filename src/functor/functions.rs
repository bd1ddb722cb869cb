//! Structural unary functions.

use std::ops::Add;

use super::traits::{Predicate, UnaryFunction};

/// Ignores its argument and returns a clone of the stored value.
///
/// `Constant(true)` and `Constant(false)` double as predicates that always
/// (or never) hold.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{Constant, UnaryFunction};
///
/// assert_eq!(Constant("fixed").evaluate(10), "fixed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant<T>(pub T);

impl<A, T: Clone> UnaryFunction<A> for Constant<T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, _argument: A) -> T {
        self.0.clone()
    }
}

impl<A: ?Sized> Predicate<A> for Constant<bool> {
    #[inline]
    fn test(&self, _argument: &A) -> bool {
        self.0
    }
}

/// Returns its argument unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Identity;

impl<A> UnaryFunction<A> for Identity {
    type Output = A;

    #[inline]
    fn evaluate(&self, argument: A) -> A {
        argument
    }
}

/// Adds the stored offset to its argument.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{Offset, UnaryFunction};
///
/// assert_eq!(Offset(2).evaluate(5), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset<T>(pub T);

impl<T: Copy + Add<Output = T>> UnaryFunction<T> for Offset<T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, argument: T) -> T {
        argument + self.0
    }
}

/// `if condition(x) { then(x) } else { otherwise(x) }` as a function value.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{Conditional, Constant, IsLessThan, UnaryFunction};
///
/// let sign = Conditional::new(IsLessThan(0), Constant(-1), Constant(1));
/// assert_eq!(sign.evaluate(-7), -1);
/// assert_eq!(sign.evaluate(7), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conditional<C, T, E> {
    condition: C,
    then: T,
    otherwise: E,
}

impl<C, T, E> Conditional<C, T, E> {
    /// Creates a conditional function from its three branches.
    pub const fn new(condition: C, then: T, otherwise: E) -> Self {
        Self {
            condition,
            then,
            otherwise,
        }
    }
}

impl<A, C, T, E> UnaryFunction<A> for Conditional<C, T, E>
where
    C: Predicate<A>,
    T: UnaryFunction<A>,
    E: UnaryFunction<A, Output = T::Output>,
{
    type Output = T::Output;

    fn evaluate(&self, argument: A) -> T::Output {
        if self.condition.test(&argument) {
            self.then.evaluate(argument)
        } else {
            self.otherwise.evaluate(argument)
        }
    }
}
