//! Predicate-gated pass-through.

use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use super::Generator;
use crate::functor::Predicate;

/// Forwards the elements of the inner generator that satisfy a predicate.
///
/// Order is preserved. Two `Filtered` values are equal when their inner
/// generators and predicates are equal.
///
/// # Examples
///
/// ```rust
/// use functors::functor::IsMultipleOf;
/// use functors::generator::{Filtered, Generator};
/// use functors::range::Range;
///
/// let evens = Filtered::new(Range::between(1, 10)?, IsMultipleOf(2));
/// assert_eq!(evens.to_collection(), vec![2, 4, 6, 8]);
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filtered<G, P> {
    generator: G,
    predicate: P,
}

impl<G, P> Filtered<G, P> {
    /// Wraps `generator`, keeping elements for which `predicate` holds.
    pub const fn new(generator: G, predicate: P) -> Self {
        Self {
            generator,
            predicate,
        }
    }

    /// Returns the wrapped generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the filtering predicate.
    pub const fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<G, P> Generator for Filtered<G, P>
where
    G: Generator,
    P: Predicate<G::Item>,
{
    type Item = G::Item;

    fn generate<B, C>(&self, mut consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>,
    {
        self.generator.generate(|element| {
            if self.predicate.test(&element) {
                consumer(element)
            } else {
                ControlFlow::Continue(())
            }
        })
    }
}

impl<G: Hash, P: Hash> Hash for Filtered<G, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "Filtered".hash(state);
        self.generator.hash(state);
        self.predicate.hash(state);
    }
}
