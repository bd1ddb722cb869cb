//! Generators over existing collections and iterators.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::ControlFlow;

use super::Generator;

/// Factories turning existing data into generators.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// use functors::generator::{EachElement, Generator};
///
/// let numbers = vec![1, 2, 3];
/// let each = EachElement::of(&numbers);
/// assert_eq!(each.to_collection(), vec![&1, &2, &3]);
/// assert_eq!(each.to_collection(), vec![&1, &2, &3]);
///
/// let mut ages = BTreeMap::new();
/// ages.insert("ada", 36);
/// ages.insert("alan", 41);
/// let entries = EachElement::of(&ages).to_collection();
/// assert_eq!(entries, vec![(&"ada", &36), (&"alan", &41)]);
///
/// let missing: Option<&Vec<i32>> = None;
/// assert!(EachElement::maybe(missing).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EachElement;

impl EachElement {
    /// Creates a restartable generator over a borrowed collection.
    pub const fn of<'a, C>(collection: &'a C) -> CollectionGenerator<'a, C>
    where
        C: ?Sized,
        &'a C: IntoIterator,
    {
        CollectionGenerator { collection }
    }

    /// Like [`EachElement::of`], propagating an absent source as `None`.
    pub fn maybe<'a, C>(collection: Option<&'a C>) -> Option<CollectionGenerator<'a, C>>
    where
        C: ?Sized,
        &'a C: IntoIterator,
    {
        collection.map(Self::of)
    }

    /// Creates a single-use generator draining `iterable`.
    pub fn of_iter<I: IntoIterator>(iterable: I) -> IteratorGenerator<I::IntoIter> {
        IteratorGenerator {
            iterator: Cell::new(Some(iterable.into_iter())),
        }
    }
}

/// A restartable generator over a borrowed collection.
///
/// Every `run` iterates the collection from the start.
pub struct CollectionGenerator<'a, C: ?Sized> {
    collection: &'a C,
}

impl<'a, C: ?Sized> CollectionGenerator<'a, C> {
    /// Returns the underlying collection.
    pub const fn collection(&self) -> &'a C {
        self.collection
    }
}

impl<'a, C> Generator for CollectionGenerator<'a, C>
where
    C: ?Sized,
    &'a C: IntoIterator,
{
    type Item = <&'a C as IntoIterator>::Item;

    fn generate<B, F>(&self, consumer: F) -> ControlFlow<B>
    where
        F: FnMut(Self::Item) -> ControlFlow<B>,
    {
        IntoIterator::into_iter(self.collection).try_for_each(consumer)
    }
}

impl<C: ?Sized> Clone for CollectionGenerator<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for CollectionGenerator<'_, C> {}

impl<C: ?Sized + fmt::Debug> fmt::Debug for CollectionGenerator<'_, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CollectionGenerator")
            .field("collection", &self.collection)
            .finish()
    }
}

impl<C: ?Sized + PartialEq> PartialEq for CollectionGenerator<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        self.collection == other.collection
    }
}

impl<C: ?Sized + Eq> Eq for CollectionGenerator<'_, C> {}

impl<C: ?Sized + Hash> Hash for CollectionGenerator<'_, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        "EachElement".hash(state);
        self.collection.hash(state);
    }
}

/// A single-use generator adapting an external iterator.
///
/// The iterator is consumed as elements are produced: a traversal that ends
/// early leaves the rest for the next `run`, and once the iterator is
/// exhausted further runs produce nothing. Not restartable.
///
/// # Examples
///
/// ```rust
/// use functors::generator::{EachElement, Generator, Until};
///
/// let cursor = EachElement::of_iter(vec![1, 2, 3, 4, 5]);
/// let head = Until::generate_until(&cursor, |value: &i32| *value == 2);
/// assert_eq!(head.to_collection(), vec![1, 2]);
/// assert_eq!(cursor.to_collection(), vec![3, 4, 5]);
/// assert!(cursor.to_collection().is_empty());
/// ```
pub struct IteratorGenerator<I> {
    iterator: Cell<Option<I>>,
}

impl<I: Iterator> Generator for IteratorGenerator<I> {
    type Item = I::Item;

    fn generate<B, F>(&self, consumer: F) -> ControlFlow<B>
    where
        F: FnMut(Self::Item) -> ControlFlow<B>,
    {
        let Some(mut iterator) = self.iterator.take() else {
            return ControlFlow::Continue(());
        };
        let flow = iterator.by_ref().try_for_each(consumer);
        if flow.is_break() {
            self.iterator.set(Some(iterator));
        }
        flow
    }
}

impl<I> fmt::Debug for IteratorGenerator<I> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("IteratorGenerator")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_slice_source() {
        let values: &[char] = &['a', 'b'];
        assert_eq!(EachElement::of(values).to_collection(), vec![&'a', &'b']);
    }

    #[test]
    fn test_map_source_visits_every_entry() {
        let mut map = HashMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let mut keys: Vec<i32> = EachElement::of(&map)
            .to_collection()
            .into_iter()
            .map(|(key, _)| *key)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_iterator_source_is_single_use() {
        let cursor = EachElement::of_iter(0..3);
        assert_eq!(cursor.to_collection(), vec![0, 1, 2]);
        assert!(cursor.to_collection().is_empty());
    }
}
