//! The thread-safe aggregator and its timer listeners.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use super::builder::AggregatorBuilder;
use super::functions::{AggregateValue, Count};
use super::store::{FoldStore, ListStore, Store};
use super::timer::{Timer, TimerMode};
use super::Aggregator;
use crate::error::{EvaluationError, FunctorError};

/// Aggregator retaining every value and evaluating a series function.
pub type ListBackedAggregator<T, F> = TimedAggregator<ListStore<T, F>>;

/// Aggregator keeping only a running fold result.
pub type NoStoreAggregator<T, F> = TimedAggregator<FoldStore<T, F>>;

/// Notified with the result of every timer tick.
///
/// The snapshot is the aggregator's evaluation taken immediately before the
/// reset that opened the next window. Listeners run on the timer's thread
/// after the aggregator's lock has been released, so they may call back into
/// the aggregator.
pub trait TimerListener<S: Store>: Send + Sync {
    /// Handles one tick.
    fn on_timer(&self, aggregator: &TimedAggregator<S>, snapshot: Option<S::Value>);
}

impl<S, F> TimerListener<S> for F
where
    S: Store,
    F: Fn(&TimedAggregator<S>, Option<S::Value>) + Send + Sync,
{
    #[inline]
    fn on_timer(&self, aggregator: &TimedAggregator<S>, snapshot: Option<S::Value>) {
        self(aggregator, snapshot);
    }
}

/// Identifies a registered [`TimerListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Lifecycle state of a [`TimedAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregatorState {
    /// Accepting values; the timer, if any, is running.
    Active,
    /// [`TimedAggregator::stop`] has been called.
    Stopped,
}

type ListenerList<S> = SmallVec<[(ListenerId, Arc<dyn TimerListener<S>>); 2]>;

struct Shared<S: Store> {
    store: Mutex<S>,
    listeners: RwLock<ListenerList<S>>,
    next_listener: AtomicU64,
    timer: Mutex<Option<Timer>>,
    stopped: AtomicBool,
}

/// A thread-safe aggregator over a [`Store`], optionally driven by a timer.
///
/// All operations take `&self`; clones share the same state. On every timer
/// tick the aggregator atomically takes a snapshot of its evaluation and
/// resets, so each added value is accounted for in exactly one window. The
/// snapshot is then handed to every registered [`TimerListener`].
///
/// The timer holds only a weak reference: dropping the last handle cancels
/// it.
///
/// # Examples
///
/// ```rust
/// use functors::aggregator::{ListBackedAggregator, Median};
///
/// let median = ListBackedAggregator::with_function(Median::copying());
/// for value in [10, 1000, 30] {
///     median.add(value)?;
/// }
/// assert_eq!(median.evaluate(), Some(30));
/// assert_eq!(median.series(), vec![10, 1000, 30]);
/// # Ok::<(), functors::EvaluationError>(())
/// ```
pub struct TimedAggregator<S: Store> {
    shared: Arc<Shared<S>>,
}

impl<S: Store> TimedAggregator<S> {
    /// Creates an aggregator without a timer.
    pub fn from_store(store: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                store: Mutex::new(store),
                listeners: RwLock::new(SmallVec::new()),
                next_listener: AtomicU64::new(0),
                timer: Mutex::new(None),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// Creates an aggregator that ticks every `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidArgument`] for a zero interval, or
    /// [`FunctorError::TimerStart`] when a private timer thread cannot be
    /// spawned.
    pub fn with_timer(store: S, interval: Duration, mode: TimerMode) -> Result<Self, FunctorError> {
        if interval.is_zero() {
            return Err(FunctorError::InvalidArgument {
                argument: "interval",
                reason: "a timer interval must be greater than zero".to_string(),
            });
        }
        let aggregator = Self::from_store(store);
        let weak: Weak<Shared<S>> = Arc::downgrade(&aggregator.shared);
        let timer = Timer::start(interval, mode, move || {
            if let Some(shared) = weak.upgrade() {
                Self { shared }.tick();
            }
        })?;
        *aggregator.shared.timer.lock() = Some(timer);
        Ok(aggregator)
    }

    /// Starts configuring an aggregator.
    #[must_use]
    pub fn builder() -> AggregatorBuilder<S> {
        AggregatorBuilder::new()
    }

    /// Adds one value.
    ///
    /// Values added after [`stop`](Self::stop) are still recorded.
    ///
    /// # Errors
    ///
    /// Returns the [`EvaluationError`] raised by the store's function; the
    /// aggregator's state is left unchanged.
    pub fn add(&self, value: S::Value) -> Result<(), EvaluationError> {
        self.shared.store.lock().add(value)
    }

    /// Evaluates the values added since the last reset.
    pub fn evaluate(&self) -> Option<S::Value> {
        self.shared.store.lock().evaluate()
    }

    /// Discards the values added since the last reset.
    pub fn reset(&self) {
        self.shared.store.lock().reset();
    }

    /// Number of retained values; always zero for fold-based stores.
    pub fn data_size(&self) -> usize {
        self.shared.store.lock().data_size()
    }

    /// Evaluates and resets in one atomic step.
    pub fn take_snapshot(&self) -> Option<S::Value> {
        let mut store = self.shared.store.lock();
        let snapshot = store.evaluate();
        store.reset();
        snapshot
    }

    /// Registers a listener invoked on every tick.
    pub fn add_timer_listener<L>(&self, listener: L) -> ListenerId
    where
        L: TimerListener<S> + 'static,
    {
        let id = ListenerId(self.shared.next_listener.fetch_add(1, Ordering::Relaxed));
        self.shared.listeners.write().push((id, Arc::new(listener)));
        tracing::trace!(listener = id.0, "timer listener added");
        id
    }

    /// Registers a closure invoked on every tick.
    ///
    /// Equivalent to [`add_timer_listener`](Self::add_timer_listener) but
    /// lets the compiler infer the closure's argument types.
    pub fn on_timer<F>(&self, callback: F) -> ListenerId
    where
        F: Fn(&Self, Option<S::Value>) + Send + Sync + 'static,
    {
        self.add_timer_listener(callback)
    }

    /// Removes a listener, returning `false` when it was not registered.
    pub fn remove_timer_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.shared.listeners.write();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    /// Removes every listener.
    pub fn clear_timer_listeners(&self) {
        self.shared.listeners.write().clear();
    }

    /// Number of registered listeners.
    pub fn timer_listener_count(&self) -> usize {
        self.shared.listeners.read().len()
    }

    /// Configured interval of the timer this aggregator owns; `None` when
    /// there is no timer or it has been stopped.
    ///
    /// The aggregator keeps its timer (and, in shared mode, the
    /// [`SharedTimer`](super::SharedTimer) it is registered on) alive until
    /// [`stop`](Self::stop). A panicking tick is logged and does not stop
    /// the timer, so a `Some` here means ticks keep being scheduled.
    pub fn interval(&self) -> Option<Duration> {
        self.shared.timer.lock().as_ref().map(Timer::interval)
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> AggregatorState {
        if self.shared.stopped.load(Ordering::Acquire) {
            AggregatorState::Stopped
        } else {
            AggregatorState::Active
        }
    }

    /// Cancels the timer. Idempotent; values may still be added and
    /// evaluated afterwards.
    ///
    /// With a private timer, no tick runs once this returns unless it is
    /// called from a listener. A shared timer only guarantees that no new
    /// tick starts.
    pub fn stop(&self) {
        if self.shared.stopped.swap(true, Ordering::AcqRel) {
            return;
        }
        let timer = self.shared.timer.lock().take();
        if let Some(timer) = timer {
            timer.cancel();
        }
        tracing::debug!("aggregator stopped");
    }

    fn tick(&self) {
        let snapshot = self.take_snapshot();
        let listeners: SmallVec<[Arc<dyn TimerListener<S>>; 2]> = self
            .shared
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        tracing::trace!(listeners = listeners.len(), "aggregator tick");
        for listener in listeners {
            let notified = panic::catch_unwind(AssertUnwindSafe(|| {
                listener.on_timer(self, snapshot.clone());
            }));
            if notified.is_err() {
                tracing::warn!("timer listener panicked; remaining listeners are still notified");
            }
        }
    }
}

impl<T, F> TimedAggregator<ListStore<T, F>>
where
    ListStore<T, F>: Store<Value = T>,
    T: Clone,
{
    /// Creates an untimed aggregator over `function`.
    pub fn with_function(function: F) -> Self {
        Self::from_store(ListStore::new(function))
    }

    /// Returns a copy of the values retained since the last reset.
    pub fn series(&self) -> Vec<T> {
        self.shared.store.lock().series().to_vec()
    }
}

impl<T, F> TimedAggregator<FoldStore<T, F>>
where
    FoldStore<T, F>: Store<Value = T>,
    T: Clone,
{
    /// Creates an untimed aggregator folding from `initial`.
    pub fn with_fold(initial: T, function: F) -> Self {
        Self::from_store(FoldStore::new(initial, function))
    }

    /// Returns the running fold result.
    pub fn result(&self) -> T {
        self.shared.store.lock().result().clone()
    }
}

impl<T: AggregateValue> TimedAggregator<FoldStore<T, Count>> {
    /// Creates an untimed counter starting from zero.
    pub fn count() -> Self {
        Self::with_fold(T::zero(), Count)
    }
}

impl<S: Store> Aggregator<S::Value> for TimedAggregator<S> {
    fn add(&self, value: S::Value) -> Result<(), EvaluationError> {
        Self::add(self, value)
    }

    fn evaluate(&self) -> Option<S::Value> {
        Self::evaluate(self)
    }

    fn reset(&self) {
        Self::reset(self);
    }

    fn data_size(&self) -> usize {
        Self::data_size(self)
    }
}

impl<S: Store> Clone for TimedAggregator<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Store> fmt::Debug for TimedAggregator<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TimedAggregator")
            .field("state", &self.state())
            .field("interval", &self.interval())
            .field("data_size", &self.data_size())
            .field("timer_listeners", &self.timer_listener_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::functions::{Mean, Sum};

    #[test]
    fn test_take_snapshot_resets() {
        let aggregator = ListBackedAggregator::with_function(Sum);
        aggregator.add(2).unwrap();
        aggregator.add(3).unwrap();
        assert_eq!(aggregator.take_snapshot(), Some(5));
        assert_eq!(aggregator.data_size(), 0);
        assert_eq!(aggregator.take_snapshot(), None);
    }

    #[test]
    fn test_listener_bookkeeping() {
        let aggregator = ListBackedAggregator::with_function(Mean);
        let first = aggregator.on_timer(|_, _: Option<f64>| {});
        let second = aggregator.on_timer(|_, _| {});
        assert_ne!(first, second);
        assert_eq!(aggregator.timer_listener_count(), 2);
        assert!(aggregator.remove_timer_listener(first));
        assert!(!aggregator.remove_timer_listener(first));
        aggregator.clear_timer_listeners();
        assert_eq!(aggregator.timer_listener_count(), 0);
    }

    #[test]
    fn test_tick_notifies_after_panicking_listener() {
        let aggregator = NoStoreAggregator::<u32, Count>::count();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        aggregator.on_timer(|_, _| panic!("listener failure"));
        aggregator.on_timer(move |_, snapshot| sink.lock().push(snapshot));
        aggregator.add(9).unwrap();
        aggregator.tick();
        assert_eq!(*seen.lock(), vec![Some(1)]);
        assert_eq!(aggregator.result(), 0);
    }

    #[test]
    fn test_untimed_stop_is_idempotent() {
        let aggregator = NoStoreAggregator::<i64, Count>::count();
        assert_eq!(aggregator.state(), AggregatorState::Active);
        aggregator.stop();
        aggregator.stop();
        assert_eq!(aggregator.state(), AggregatorState::Stopped);
        aggregator.add(1).unwrap();
        assert_eq!(aggregator.result(), 1);
    }
}
