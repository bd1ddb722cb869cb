//! Push-style, restartable sequence producers.
//!
//! A [`Generator`] pushes its elements into a consumer instead of handing out
//! an iterator. Decorators wrap an inner generator and apply a policy to what
//! flows through:
//!
//! - [`Filtered`]: forwards elements satisfying a predicate
//! - [`Transformed`]: forwards the image of each element under a function
//! - [`While`]: stops at the first element failing a predicate
//! - [`Until`]: stops after the first element satisfying a predicate
//!
//! Sources are [`Range`](crate::range::Range) values and the
//! [`EachElement`] factories. Generated elements are materialized through a
//! [`Collector`].
//!
//! # Restartability
//!
//! Range and collection backed generators produce their full sequence on
//! every `run`. [`IteratorGenerator`] adapts a single-pass iterator and yields
//! each element at most once over its lifetime.
//!
//! # Examples
//!
//! ```rust
//! use functors::functor::{IsMultipleOf, Offset};
//! use functors::generator::Generator;
//! use functors::range::Range;
//!
//! let evens = Range::between(1, 10)?.filter(IsMultipleOf(2));
//! assert_eq!(evens.to_collection(), vec![2, 4, 6, 8]);
//!
//! // Restartable: a second run sees the same sequence.
//! let shifted = evens.map(Offset(100));
//! assert_eq!(shifted.to_collection(), vec![102, 104, 106, 108]);
//! assert_eq!(shifted.to_collection(), vec![102, 104, 106, 108]);
//! # Ok::<(), functors::FunctorError>(())
//! ```

mod bounded;
mod collector;
mod each_element;
mod filtered;
mod transformed;

use std::convert::Infallible;
use std::ops::ControlFlow;

pub use bounded::{Boundary, Until, While};
pub use collector::{Collector, IntoCollection, ListCollector};
pub use each_element::{CollectionGenerator, EachElement, IteratorGenerator};
pub use filtered::Filtered;
pub use transformed::Transformed;

use crate::functor::{Predicate, Procedure, UnaryFunction};

/// A lazy producer that pushes its elements, in order, into a consumer.
///
/// Implementors provide [`generate`](Generator::generate), which lets the
/// consumer end the traversal early by returning [`ControlFlow::Break`]. The
/// remaining methods are derived from it.
pub trait Generator {
    /// The type of the produced elements.
    type Item;

    /// Pushes elements into `consumer` until the sequence is exhausted or the
    /// consumer breaks. Returns the break value, if any.
    fn generate<B, C>(&self, consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>;

    /// Runs `procedure` on every element.
    ///
    /// An empty generator never calls the procedure.
    fn run<P>(&self, mut procedure: P)
    where
        P: Procedure<Self::Item>,
    {
        let flow: ControlFlow<Infallible> = self.generate(|element| {
            procedure.run(element);
            ControlFlow::Continue(())
        });
        match flow {
            ControlFlow::Continue(()) => {}
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Runs a fallible consumer, stopping at and returning its first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `consumer`, unchanged.
    fn try_run<E, C>(&self, mut consumer: C) -> Result<(), E>
    where
        C: FnMut(Self::Item) -> Result<(), E>,
    {
        let flow = self.generate(|element| match consumer(element) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => ControlFlow::Break(error),
        });
        match flow {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(error) => Err(error),
        }
    }

    /// Materializes the generator through `collector`.
    fn to<C>(&self, collector: C) -> C::Output
    where
        Self: Sized,
        C: Collector<Self::Item>,
    {
        collector.collect(self)
    }

    /// Materializes the generator into a fresh `Vec`.
    fn to_collection(&self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        self.to(ListCollector)
    }

    /// Wraps this generator in a [`Filtered`] decorator.
    fn filter<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Predicate<Self::Item>,
    {
        Filtered::new(self, predicate)
    }

    /// Wraps this generator in a [`Transformed`] decorator.
    fn map<F>(self, function: F) -> Transformed<Self, F>
    where
        Self: Sized,
        F: UnaryFunction<Self::Item>,
    {
        Transformed::new(self, function)
    }

    /// Wraps this generator in a [`While`] decorator with the exclusive
    /// boundary.
    fn take_while<P>(self, predicate: P) -> While<Self, P>
    where
        Self: Sized,
        P: Predicate<Self::Item>,
    {
        While::generate_while(self, predicate)
    }

    /// Wraps this generator in an [`Until`] decorator with the inclusive
    /// boundary.
    fn until<P>(self, predicate: P) -> Until<Self, P>
    where
        Self: Sized,
        P: Predicate<Self::Item>,
    {
        Until::generate_until(self, predicate)
    }
}

impl<G: Generator + ?Sized> Generator for &G {
    type Item = G::Item;

    fn generate<B, C>(&self, consumer: C) -> ControlFlow<B>
    where
        C: FnMut(Self::Item) -> ControlFlow<B>,
    {
        (**self).generate(consumer)
    }
}
