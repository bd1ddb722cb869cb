//! Arity adapters: bind one argument of a binary function.

use super::traits::{BinaryFunction, UnaryFunction};

/// Binds the left argument of a binary function, yielding `f(bound, x)`.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{LeftBound, UnaryFunction};
///
/// let ten_minus = LeftBound::new(|left: i32, right: i32| left - right, 10);
/// assert_eq!(ten_minus.evaluate(3), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeftBound<F, A> {
    function: F,
    bound: A,
}

impl<F, A> LeftBound<F, A> {
    /// Binds `bound` as the left argument of `function`.
    pub const fn new(function: F, bound: A) -> Self {
        Self { function, bound }
    }
}

impl<A, B, F> UnaryFunction<B> for LeftBound<F, A>
where
    A: Clone,
    F: BinaryFunction<A, B>,
{
    type Output = F::Output;

    #[inline]
    fn evaluate(&self, argument: B) -> F::Output {
        self.function.evaluate(self.bound.clone(), argument)
    }
}

/// Binds the right argument of a binary function, yielding `f(x, bound)`.
///
/// # Examples
///
/// ```rust
/// use functors::functor::{RightBound, UnaryFunction};
///
/// let minus_ten = RightBound::new(|left: i32, right: i32| left - right, 10);
/// assert_eq!(minus_ten.evaluate(3), -7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RightBound<F, B> {
    function: F,
    bound: B,
}

impl<F, B> RightBound<F, B> {
    /// Binds `bound` as the right argument of `function`.
    pub const fn new(function: F, bound: B) -> Self {
        Self { function, bound }
    }
}

impl<A, B, F> UnaryFunction<A> for RightBound<F, B>
where
    B: Clone,
    F: BinaryFunction<A, B>,
{
    type Output = F::Output;

    #[inline]
    fn evaluate(&self, argument: A) -> F::Output {
        self.function.evaluate(argument, self.bound.clone())
    }
}
