//! Builder and configuration for timed aggregators.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::store::{FoldStore, ListStore, Store};
use super::timed::TimedAggregator;
use super::timer::{SharedTimer, TimerMode};
use crate::error::FunctorError;

/// Timer settings, loadable from configuration files with the `serde`
/// feature.
///
/// An `interval_millis` of zero means no timer.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::TimerConfig;
///
/// let config = TimerConfig::every_millis(250).shared();
/// assert_eq!(config.interval_millis, 250);
/// assert!(config.use_shared_timer);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerConfig {
    /// Tick interval in milliseconds; `0` disables the timer.
    pub interval_millis: u64,
    /// Schedule ticks on the process-wide shared timer instead of a
    /// dedicated thread.
    pub use_shared_timer: bool,
}

impl TimerConfig {
    /// A private timer ticking every `interval_millis`.
    pub const fn every_millis(interval_millis: u64) -> Self {
        Self {
            interval_millis,
            use_shared_timer: false,
        }
    }

    /// Switches to the shared timer.
    #[must_use]
    pub const fn shared(mut self) -> Self {
        self.use_shared_timer = true;
        self
    }

    /// The interval as a [`Duration`].
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_millis)
    }
}

/// Configures a [`TimedAggregator`].
///
/// Only the store (or its aggregation function) is required; without an
/// interval the aggregator has no timer.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{ListBackedAggregator, Mean};
///
/// let mean = ListBackedAggregator::<f64, Mean>::builder()
///     .function(Mean)
///     .build()?;
/// mean.add(2.0)?;
/// mean.add(4.0)?;
/// assert_eq!(mean.evaluate(), Some(3.0));
///
/// let missing = ListBackedAggregator::<f64, Mean>::builder().build();
/// assert!(missing.is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AggregatorBuilder<S: Store> {
    store: Option<S>,
    interval: Duration,
    use_shared_timer: bool,
    shared_timer: Option<Arc<SharedTimer>>,
}

impl<S: Store> AggregatorBuilder<S> {
    pub(crate) const fn new() -> Self {
        Self {
            store: None,
            interval: Duration::ZERO,
            use_shared_timer: false,
            shared_timer: None,
        }
    }

    /// Sets the store directly.
    #[must_use]
    pub fn store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the tick interval; [`Duration::ZERO`] disables the timer.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the tick interval in milliseconds; `0` disables the timer.
    #[must_use]
    pub const fn interval_millis(mut self, interval_millis: u64) -> Self {
        self.interval = Duration::from_millis(interval_millis);
        self
    }

    /// Schedules ticks on the process-wide shared timer.
    #[must_use]
    pub const fn use_shared_timer(mut self, use_shared_timer: bool) -> Self {
        self.use_shared_timer = use_shared_timer;
        self
    }

    /// Schedules ticks on a specific shared timer.
    #[must_use]
    pub fn shared_timer(mut self, timer: Arc<SharedTimer>) -> Self {
        self.shared_timer = Some(timer);
        self.use_shared_timer = true;
        self
    }

    /// Applies interval and timer choice from a [`TimerConfig`].
    #[must_use]
    pub const fn config(mut self, config: TimerConfig) -> Self {
        self.interval = config.interval();
        self.use_shared_timer = config.use_shared_timer;
        self
    }

    /// Builds the aggregator and starts its timer.
    ///
    /// # Errors
    ///
    /// - [`FunctorError::NullArgument`] when no store or function was given
    /// - [`FunctorError::TimerStart`] when a private timer thread cannot be
    ///   spawned
    pub fn build(self) -> Result<TimedAggregator<S>, FunctorError> {
        let store = self.store.ok_or(FunctorError::NullArgument {
            argument: "aggregation function",
        })?;
        if self.interval.is_zero() {
            return Ok(TimedAggregator::from_store(store));
        }
        let mode = match (self.shared_timer, self.use_shared_timer) {
            (Some(timer), true) => TimerMode::Shared(timer),
            (_, true) => TimerMode::global(),
            (_, false) => TimerMode::Private,
        };
        tracing::debug!(interval = ?self.interval, ?mode, "building timed aggregator");
        TimedAggregator::with_timer(store, self.interval, mode)
    }
}

impl<T, F> AggregatorBuilder<ListStore<T, F>>
where
    ListStore<T, F>: Store,
{
    /// Sets the series function evaluated over the retained values.
    #[must_use]
    pub fn function(self, function: F) -> Self {
        self.store(ListStore::new(function))
    }
}

impl<T, F> AggregatorBuilder<FoldStore<T, F>>
where
    FoldStore<T, F>: Store,
    T: Clone,
{
    /// Sets the fold function and its initial value.
    #[must_use]
    pub fn fold(self, initial: T, function: F) -> Self {
        self.store(FoldStore::new(initial, function))
    }
}

impl<S: Store> Default for AggregatorBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> fmt::Debug for AggregatorBuilder<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AggregatorBuilder")
            .field("has_store", &self.store.is_some())
            .field("interval", &self.interval)
            .field("use_shared_timer", &self.use_shared_timer)
            .finish_non_exhaustive()
    }
}
