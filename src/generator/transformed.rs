//! Per-element mapping.

use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use super::Generator;
use crate::functor::UnaryFunction;

/// Forwards `function(e)` for every element `e` of the inner generator.
///
/// The element type may change; the element count never does.
///
/// # Examples
///
/// ```rust
/// use functors::functor::Offset;
/// use functors::generator::{Generator, Transformed};
/// use functors::range::Range;
///
/// let shifted = Transformed::new(Range::between(1, 10)?, Offset(2));
/// assert_eq!(shifted.to_collection(), vec![3, 4, 5, 6, 7, 8, 9, 10, 11]);
///
/// let labels = Transformed::new(Range::between(1, 3)?, |n: i32| format!("#{n}"));
/// assert_eq!(labels.to_collection(), vec!["#1", "#2"]);
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed<G, F> {
    generator: G,
    function: F,
}

impl<G, F> Transformed<G, F> {
    /// Wraps `generator`, mapping every element through `function`.
    pub const fn new(generator: G, function: F) -> Self {
        Self {
            generator,
            function,
        }
    }

    /// Returns the wrapped generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the mapping function.
    pub const fn function(&self) -> &F {
        &self.function
    }
}

impl<G, F> Generator for Transformed<G, F>
where
    G: Generator,
    F: UnaryFunction<G::Item>,
{
    type Item = F::Output;

    fn generate<B, C>(&self, mut consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>,
    {
        self.generator
            .generate(|element| consumer(self.function.evaluate(element)))
    }
}

impl<G: Hash, F: Hash> Hash for Transformed<G, F> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "Transformed".hash(state);
        self.generator.hash(state);
        self.function.hash(state);
    }
}
