//! Materializing generators into containers.

use super::Generator;

/// Drains a generator into some output container.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use functors::generator::{Generator, IntoCollection};
/// use functors::range::Range;
///
/// let mut seen = BTreeSet::from([100]);
/// let returned = Range::between(3, 0)?.to(IntoCollection::new(&mut seen));
/// returned.insert(200);
/// assert_eq!(seen, BTreeSet::from([1, 2, 3, 100, 200]));
/// # Ok::<(), functors::FunctorError>(())
/// ```
pub trait Collector<T> {
    /// The container returned once the generator is exhausted.
    type Output;

    /// Runs `generator` to completion, accumulating its elements.
    fn collect<G>(self, generator: &G) -> Self::Output
    where
        G: Generator<Item = T>;
}

/// Collects into a freshly allocated `Vec`, preserving order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListCollector;

impl<T> Collector<T> for ListCollector {
    type Output = Vec<T>;

    fn collect<G>(self, generator: &G) -> Vec<T>
    where
        G: Generator<Item = T>,
    {
        let mut elements = Vec::new();
        generator.run(|element| elements.push(element));
        elements
    }
}

/// Appends into a caller supplied container and hands the same reference
/// back, so pre-seeded contents are kept.
#[derive(Debug)]
pub struct IntoCollection<'a, C> {
    target: &'a mut C,
}

impl<'a, C> IntoCollection<'a, C> {
    /// Targets `target`; existing contents are left in place.
    pub const fn new(target: &'a mut C) -> Self {
        Self { target }
    }
}

impl<'a, T, C> Collector<T> for IntoCollection<'a, C>
where
    C: Extend<T>,
{
    type Output = &'a mut C;

    fn collect<G>(self, generator: &G) -> &'a mut C
    where
        G: Generator<Item = T>,
    {
        let target = self.target;
        generator.run(|element| target.extend(Some(element)));
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EachElement;

    #[test]
    fn test_into_collection_returns_same_reference() {
        let source = [1, 2];
        let mut target: Vec<i32> = vec![0];
        let address = std::ptr::addr_of!(target);
        let returned = EachElement::of(&source)
            .map(|value: &i32| *value)
            .to(IntoCollection::new(&mut target));
        assert!(std::ptr::eq(address, returned));
        assert_eq!(returned, &mut vec![0, 1, 2]);
    }

    #[test]
    fn test_list_collector_on_empty_generator() {
        let source: [u8; 0] = [];
        let collected = EachElement::of(&source).to(ListCollector);
        assert!(collected.is_empty());
    }
}
