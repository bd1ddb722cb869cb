//! Thread-safe aggregation of numeric samples over time windows.
//!
//! An aggregator accepts values from any number of threads and evaluates an
//! aggregation function over them. Two storage strategies exist:
//!
//! - [`ListBackedAggregator`]: retains every value of the current window in a
//!   [`ListStore`] and evaluates a [`SeriesFunction`] ([`Mean`], [`Median`],
//!   [`Max`], [`Sum`], [`Percentile`]).
//! - [`NoStoreAggregator`]: keeps a single running result in a [`FoldStore`]
//!   updated by a [`FoldFunction`] ([`Count`], [`FoldSum`], [`FoldMax`],
//!   [`FoldMin`], [`CheckedSum`]).
//!
//! With a timer attached, the aggregator periodically evaluates and resets in
//! one atomic step, then hands the snapshot to its [`TimerListener`]s. Timers
//! run either on a dedicated thread or on a [`SharedTimer`]; see the
//! [`timer`] module.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::thread;
//!
//! use functors::aggregator::{Count, NoStoreAggregator};
//!
//! let requests = NoStoreAggregator::<u64, Count>::count();
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let requests = requests.clone();
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 requests.add(1).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(requests.result(), 400);
//!
//! let reported = Arc::new(AtomicU64::new(0));
//! let sink = Arc::clone(&reported);
//! requests.on_timer(move |_, snapshot| {
//!     sink.fetch_add(snapshot.unwrap_or(0), Ordering::SeqCst);
//! });
//! ```

mod builder;
mod functions;
mod store;
mod timed;
pub mod timer;

pub use builder::{AggregatorBuilder, TimerConfig};
pub use functions::{
    AggregateValue, CheckedSum, Count, FoldFunction, FoldMax, FoldMin, FoldSum, Max, Mean, Median,
    Percentile, SeriesFunction, Sum, Total,
};
pub use store::{FoldStore, ListStore, Store};
pub use timed::{
    AggregatorState, ListBackedAggregator, ListenerId, NoStoreAggregator, TimedAggregator,
    TimerListener,
};
pub use timer::{SharedTimer, SharedTimerBuilder, TimerMode, TimerRegistration};

use crate::error::EvaluationError;

/// Accumulates values and evaluates them on demand.
///
/// Every method takes `&self`; implementations synchronize internally and are
/// safe to share between threads.
pub trait Aggregator<T> {
    /// Adds one value.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] when the value cannot be combined with
    /// the current state, which is then left unchanged.
    fn add(&self, value: T) -> Result<(), EvaluationError>;

    /// Evaluates the values added since the last reset.
    fn evaluate(&self) -> Option<T>;

    /// Discards the values added since the last reset.
    fn reset(&self);

    /// Number of retained values.
    fn data_size(&self) -> usize;
}

static_assertions::assert_impl_all!(ListBackedAggregator<f64, Mean>: Send, Sync, Clone);
static_assertions::assert_impl_all!(NoStoreAggregator<u64, Count>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SharedTimer: Send, Sync);
static_assertions::assert_impl_all!(TimerRegistration: Send, Sync);
