//! Storage strategies behind a [`TimedAggregator`](super::TimedAggregator).

use std::fmt;

use num_traits::Bounded;

use super::functions::{
    AggregateValue, Count, FoldFunction, FoldMax, FoldMin, FoldSum, SeriesFunction,
};
use crate::error::EvaluationError;

/// Holds the values added since the last reset and evaluates them.
///
/// A store is always accessed under the aggregator's lock, so implementations
/// need no synchronization of their own.
pub trait Store: Send + 'static {
    /// The type of the added values and of the evaluation result.
    type Value: Clone + Send + 'static;

    /// Records one value.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the value cannot be combined with
    /// the current state, which is then left unchanged.
    fn add(&mut self, value: Self::Value) -> Result<(), EvaluationError>;

    /// Computes the current result, `None` when there is none.
    fn evaluate(&mut self) -> Option<Self::Value>;

    /// Discards everything recorded since the last reset.
    fn reset(&mut self);

    /// Number of retained values.
    fn data_size(&self) -> usize;
}

/// Retains every value and evaluates a [`SeriesFunction`] over them.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{ListStore, Max, Store};
///
/// let mut store = ListStore::new(Max);
/// store.add(3)?;
/// store.add(8)?;
/// assert_eq!(store.evaluate(), Some(8));
/// assert_eq!(store.data_size(), 2);
/// # Ok::<(), functors::EvaluationError>(())
/// ```
#[derive(Clone, Default)]
pub struct ListStore<T, F> {
    series: Vec<T>,
    function: F,
}

impl<T, F> ListStore<T, F> {
    /// Creates an empty store evaluating `function`.
    pub const fn new(function: F) -> Self {
        Self {
            series: Vec::new(),
            function,
        }
    }

    /// Returns the retained values in their current order.
    ///
    /// In-place order statistics may have sorted them.
    pub fn series(&self) -> &[T] {
        &self.series
    }

    /// Returns the series function.
    pub const fn function(&self) -> &F {
        &self.function
    }
}

impl<T, F> Store for ListStore<T, F>
where
    T: Clone + Send + 'static,
    F: SeriesFunction<T> + Send + 'static,
{
    type Value = T;

    fn add(&mut self, value: T) -> Result<(), EvaluationError> {
        self.series.push(value);
        Ok(())
    }

    fn evaluate(&mut self) -> Option<T> {
        self.function.apply(&mut self.series)
    }

    fn reset(&mut self) {
        self.series.clear();
    }

    fn data_size(&self) -> usize {
        self.series.len()
    }
}

impl<T: fmt::Debug, F> fmt::Debug for ListStore<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ListStore")
            .field("series", &self.series)
            .finish_non_exhaustive()
    }
}

/// Keeps only a running result, folded with a [`FoldFunction`] on every add.
///
/// Nothing is retained, so [`Store::data_size`] is always zero.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{FoldStore, Store};
///
/// let mut store = FoldStore::count(0_u64);
/// store.add(17)?;
/// store.add(4)?;
/// assert_eq!(store.evaluate(), Some(2));
///
/// store.reset();
/// assert_eq!(store.evaluate(), Some(0));
/// # Ok::<(), functors::EvaluationError>(())
/// ```
#[derive(Clone)]
pub struct FoldStore<T, F> {
    initial: T,
    result: T,
    function: F,
}

impl<T: Clone, F> FoldStore<T, F> {
    /// Creates a store starting from `initial`, to which it returns on reset.
    pub fn new(initial: T, function: F) -> Self {
        Self {
            result: initial.clone(),
            initial,
            function,
        }
    }

    /// Returns the running result.
    pub const fn result(&self) -> &T {
        &self.result
    }

    /// Returns the value restored on reset.
    pub const fn initial(&self) -> &T {
        &self.initial
    }
}

impl<T: AggregateValue> FoldStore<T, Count> {
    /// Counts additions starting from `initial`.
    pub fn count(initial: T) -> Self {
        Self::new(initial, Count)
    }
}

impl<T: AggregateValue> FoldStore<T, FoldSum> {
    /// Sums additions starting from zero.
    pub fn sum() -> Self {
        Self::new(T::zero(), FoldSum)
    }
}

impl<T: AggregateValue + Bounded> FoldStore<T, FoldMax> {
    /// Tracks the maximum, starting from the type's minimum.
    pub fn max() -> Self {
        Self::new(T::min_value(), FoldMax)
    }
}

impl<T: AggregateValue + Bounded> FoldStore<T, FoldMin> {
    /// Tracks the minimum, starting from the type's maximum.
    pub fn min() -> Self {
        Self::new(T::max_value(), FoldMin)
    }
}

impl<T, F> Store for FoldStore<T, F>
where
    T: Clone + Send + 'static,
    F: FoldFunction<T> + Send + 'static,
{
    type Value = T;

    fn add(&mut self, value: T) -> Result<(), EvaluationError> {
        let next = self.function.fold(&self.result, value)?;
        self.result = next;
        Ok(())
    }

    fn evaluate(&mut self) -> Option<T> {
        Some(self.result.clone())
    }

    fn reset(&mut self) {
        self.result = self.initial.clone();
    }

    fn data_size(&self) -> usize {
        0
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FoldStore<T, F> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("FoldStore")
            .field("initial", &self.initial)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::functions::CheckedSum;

    #[test]
    fn test_failed_fold_keeps_result() {
        let mut store = FoldStore::new(120_i8, CheckedSum);
        assert!(store.add(10).is_err());
        assert_eq!(store.result(), &120);
        store.add(7).unwrap();
        assert_eq!(store.evaluate(), Some(127));
    }

    #[test]
    fn test_fold_store_retains_nothing() {
        let mut store = FoldStore::<i32, _>::sum();
        store.add(5).unwrap();
        assert_eq!(store.data_size(), 0);
    }

    #[test]
    fn test_min_and_max_start_from_bounds() {
        let mut max = FoldStore::<i16, _>::max();
        let mut min = FoldStore::<i16, _>::min();
        assert_eq!(max.evaluate(), Some(i16::MIN));
        assert_eq!(min.evaluate(), Some(i16::MAX));
        max.add(-4).unwrap();
        min.add(-4).unwrap();
        assert_eq!((max.evaluate(), min.evaluate()), (Some(-4), Some(-4)));
    }

    #[test]
    fn test_list_store_reset_clears_series() {
        let mut store = ListStore::new(crate::aggregator::functions::Sum);
        store.add(1.5).unwrap();
        store.reset();
        assert_eq!(store.data_size(), 0);
        assert_eq!(store.evaluate(), None);
    }
}
