//! Early termination: `While` and `Until`.
//!
//! Both decorators end the traversal of the inner generator once their
//! predicate decides so. They differ in polarity (keep going while the
//! predicate holds vs. stop once it holds) and, by default, in whether the
//! element that triggers the stop is forwarded. The [`Boundary`] mode makes
//! that second choice explicit.
//!
//! Each decorator offers two constructors differing only in argument order
//! (`generate_while(generator, predicate)` and
//! `while_generate(predicate, generator)`); they build identical values.
//!
//! Predicates are expected to be pure: the element is tested before it is
//! handed to the consumer even when the boundary is inclusive.

use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use super::Generator;
use crate::functor::Predicate;

/// Whether the element that triggers the stop is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// The triggering element is not forwarded (pre-check).
    Exclusive,
    /// The triggering element is forwarded, then the traversal ends
    /// (post-check).
    Inclusive,
}

/// Forwards elements while the predicate holds.
///
/// With the default [`Boundary::Exclusive`] the first failing element ends the
/// traversal and is dropped; [`While::inclusive`] forwards it first.
///
/// # Examples
///
/// ```rust
/// use functors::functor::IsLessThan;
/// use functors::generator::{Generator, While};
/// use functors::range::Range;
///
/// let small = While::generate_while(Range::between(1, 100)?, IsLessThan(4));
/// assert_eq!(small.to_collection(), vec![1, 2, 3]);
///
/// let with_boundary = While::inclusive(Range::between(1, 100)?, IsLessThan(4));
/// assert_eq!(with_boundary.to_collection(), vec![1, 2, 3, 4]);
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While<G, P> {
    generator: G,
    predicate: P,
    boundary: Boundary,
}

impl<G, P> While<G, P> {
    /// Generator-first constructor with the exclusive boundary.
    pub const fn generate_while(generator: G, predicate: P) -> Self {
        Self {
            generator,
            predicate,
            boundary: Boundary::Exclusive,
        }
    }

    /// Predicate-first alias of [`While::generate_while`].
    pub const fn while_generate(predicate: P, generator: G) -> Self {
        Self::generate_while(generator, predicate)
    }

    /// Forwards the first failing element before stopping.
    pub const fn inclusive(generator: G, predicate: P) -> Self {
        Self {
            generator,
            predicate,
            boundary: Boundary::Inclusive,
        }
    }

    /// Returns the wrapped generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the continuation predicate.
    pub const fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Returns the boundary mode.
    pub const fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl<G, P> Generator for While<G, P>
where
    G: Generator,
    P: Predicate<G::Item>,
{
    type Item = G::Item;

    fn generate<B, C>(&self, consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>,
    {
        stop_when(&self.generator, self.boundary, consumer, |element| {
            !self.predicate.test(element)
        })
    }
}

impl<G: Hash, P: Hash> Hash for While<G, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "While".hash(state);
        self.generator.hash(state);
        self.predicate.hash(state);
        self.boundary.hash(state);
    }
}

/// Forwards elements until the predicate holds.
///
/// With the default [`Boundary::Inclusive`] the first element satisfying the
/// predicate is forwarded and then the traversal ends;
/// [`Until::exclusive`] drops it.
///
/// # Examples
///
/// ```rust
/// use functors::functor::IsEqual;
/// use functors::generator::{Generator, Until};
/// use functors::range::Range;
///
/// let up_to_five = Until::until_generate(IsEqual(5), Range::between(1, 100)?);
/// assert_eq!(up_to_five.to_collection(), vec![1, 2, 3, 4, 5]);
///
/// let before_five = Until::exclusive(Range::between(1, 100)?, IsEqual(5));
/// assert_eq!(before_five.to_collection(), vec![1, 2, 3, 4]);
/// # Ok::<(), functors::FunctorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Until<G, P> {
    generator: G,
    predicate: P,
    boundary: Boundary,
}

impl<G, P> Until<G, P> {
    /// Generator-first constructor with the inclusive boundary.
    pub const fn generate_until(generator: G, predicate: P) -> Self {
        Self {
            generator,
            predicate,
            boundary: Boundary::Inclusive,
        }
    }

    /// Predicate-first alias of [`Until::generate_until`].
    pub const fn until_generate(predicate: P, generator: G) -> Self {
        Self::generate_until(generator, predicate)
    }

    /// Drops the element satisfying the predicate instead of forwarding it.
    pub const fn exclusive(generator: G, predicate: P) -> Self {
        Self {
            generator,
            predicate,
            boundary: Boundary::Exclusive,
        }
    }

    /// Returns the wrapped generator.
    pub const fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns the stopping predicate.
    pub const fn predicate(&self) -> &P {
        &self.predicate
    }

    /// Returns the boundary mode.
    pub const fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl<G, P> Generator for Until<G, P>
where
    G: Generator,
    P: Predicate<G::Item>,
{
    type Item = G::Item;

    fn generate<B, C>(&self, consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>,
    {
        stop_when(&self.generator, self.boundary, consumer, |element| {
            self.predicate.test(element)
        })
    }
}

impl<G: Hash, P: Hash> Hash for Until<G, P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "Until".hash(state);
        self.generator.hash(state);
        self.predicate.hash(state);
        self.boundary.hash(state);
    }
}

/// Drives `generator`, ending the traversal at the first element for which
/// `stop` holds. `Break(None)` marks our own stop, `Break(Some(_))` the
/// consumer's.
fn stop_when<G, B, C, S>(
    generator: &G,
    boundary: Boundary,
    mut consumer: C,
    stop: S,
) -> ControlFlow<B>
where
    G: Generator,
    C: FnMut(G::Item) -> ControlFlow<B>,
    S: Fn(&G::Item) -> bool,
{
    let flow = generator.generate(|element| {
        let stopping = stop(&element);
        if stopping && boundary == Boundary::Exclusive {
            return ControlFlow::Break(None);
        }
        if let ControlFlow::Break(value) = consumer(element) {
            return ControlFlow::Break(Some(value));
        }
        if stopping {
            ControlFlow::Break(None)
        } else {
            ControlFlow::Continue(())
        }
    });
    match flow {
        ControlFlow::Break(Some(value)) => ControlFlow::Break(value),
        ControlFlow::Break(None) | ControlFlow::Continue(()) => ControlFlow::Continue(()),
    }
}
