//! The four functor capabilities.
//!
//! Every closure with a matching signature implements the corresponding
//! trait, so plain closures and the structural functor values in this module
//! can be used interchangeably wherever a policy object is expected.

/// A boolean test over a borrowed argument.
///
/// # Examples
///
/// ```rust
/// use functors::functor::Predicate;
///
/// let is_positive = |value: &i32| *value > 0;
/// assert!(is_positive.test(&3));
/// assert!(!is_positive.test(&-3));
/// ```
pub trait Predicate<A: ?Sized> {
    /// Evaluates the predicate against `argument`.
    fn test(&self, argument: &A) -> bool;
}

impl<A: ?Sized, F> Predicate<A> for F
where
    F: Fn(&A) -> bool,
{
    #[inline]
    fn test(&self, argument: &A) -> bool {
        self(argument)
    }
}

/// A function of one argument.
///
/// # Examples
///
/// ```rust
/// use functors::functor::UnaryFunction;
///
/// let double = |value: i32| value * 2;
/// assert_eq!(double.evaluate(21), 42);
/// ```
pub trait UnaryFunction<A> {
    /// The type produced by the function.
    type Output;

    /// Applies the function to `argument`.
    fn evaluate(&self, argument: A) -> Self::Output;
}

impl<A, B, F> UnaryFunction<A> for F
where
    F: Fn(A) -> B,
{
    type Output = B;

    #[inline]
    fn evaluate(&self, argument: A) -> B {
        self(argument)
    }
}

/// A function of two arguments.
///
/// # Examples
///
/// ```rust
/// use functors::functor::BinaryFunction;
///
/// let subtract = |left: i32, right: i32| left - right;
/// assert_eq!(subtract.evaluate(10, 4), 6);
/// ```
pub trait BinaryFunction<A, B> {
    /// The type produced by the function.
    type Output;

    /// Applies the function to `left` and `right`.
    fn evaluate(&self, left: A, right: B) -> Self::Output;
}

impl<A, B, C, F> BinaryFunction<A, B> for F
where
    F: Fn(A, B) -> C,
{
    type Output = C;

    #[inline]
    fn evaluate(&self, left: A, right: B) -> C {
        self(left, right)
    }
}

/// A side-effecting action over one argument.
///
/// Procedures take `&mut self` so that consumers accumulating into local
/// state (a counter, a `Vec`) can be passed straight to
/// [`Generator::run`](crate::generator::Generator::run).
///
/// # Examples
///
/// ```rust
/// use functors::functor::Procedure;
///
/// let mut seen = Vec::new();
/// let mut record = |value: i32| seen.push(value);
/// record.run(1);
/// record.run(2);
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub trait Procedure<A> {
    /// Performs the action on `argument`.
    fn run(&mut self, argument: A);
}

impl<A, F> Procedure<A> for F
where
    F: FnMut(A),
{
    #[inline]
    fn run(&mut self, argument: A) {
        self(argument);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_twice<F: UnaryFunction<i32, Output = i32>>(function: &F, value: i32) -> i32 {
        function.evaluate(function.evaluate(value))
    }

    #[test]
    fn test_closure_is_unary_function() {
        assert_eq!(apply_twice(&|value: i32| value + 3, 1), 7);
    }

    #[test]
    fn test_predicate_on_unsized_argument() {
        let non_empty = |text: &str| !text.is_empty();
        assert!(non_empty.test("abc"));
        assert!(!non_empty.test(""));
    }
}
