//! Timer service shared by many aggregators.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::FunctorError;

// =============================================================================
// Global Timer
// =============================================================================

/// Process-wide shared timer, initialized lazily on first access and never
/// dropped.
static GLOBAL_TIMER: LazyLock<Arc<SharedTimer>> = LazyLock::new(|| {
    Arc::new(
        SharedTimer::builder()
            .thread_name("functors-global-timer")
            .build()
            .expect("Failed to create global shared timer"),
    )
});

// =============================================================================
// SharedTimer
// =============================================================================

/// Schedules periodic callbacks for many registrations on one small tokio
/// runtime.
///
/// Each tick of a registration runs its callback on the runtime's blocking
/// pool, so a slow callback never delays other registrations. Ticks of one
/// registration never overlap; a late tick delays the following ones.
///
/// Dropping a `SharedTimer` shuts its runtime down without waiting, which
/// cancels every registration still attached to it.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// use functors::aggregator::SharedTimer;
///
/// let timer = SharedTimer::builder().worker_threads(1).build()?;
/// let ticks = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&ticks);
/// let registration = timer.register(Duration::from_millis(5), move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// })?;
/// assert_eq!(timer.active_registrations(), 1);
///
/// registration.cancel();
/// # Ok::<(), functors::FunctorError>(())
/// ```
pub struct SharedTimer {
    handle: Handle,
    runtime: Option<Runtime>,
    next_registration: AtomicU64,
    active: Arc<AtomicUsize>,
}

impl SharedTimer {
    /// Creates a timer with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::TimerStart`] when the runtime's threads cannot
    /// be spawned.
    pub fn new() -> Result<Self, FunctorError> {
        Self::builder().build()
    }

    /// Starts configuring a new timer.
    #[must_use]
    pub fn builder() -> SharedTimerBuilder {
        SharedTimerBuilder::default()
    }

    /// Returns the process-wide shared timer.
    ///
    /// # Panics
    ///
    /// Panics on first use if the timer's runtime cannot be created.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_TIMER)
    }

    /// Calls `callback` every `interval` until the returned registration is
    /// cancelled or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::InvalidArgument`] for a zero interval.
    pub fn register<F>(
        &self,
        interval: Duration,
        callback: F,
    ) -> Result<TimerRegistration, FunctorError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        if interval.is_zero() {
            return Err(FunctorError::InvalidArgument {
                argument: "interval",
                reason: "a timer interval must be greater than zero".to_string(),
            });
        }
        let id = self.next_registration.fetch_add(1, Ordering::Relaxed);
        let cancelled = Arc::new(AtomicBool::new(false));
        let guard = ActiveGuard::new(Arc::clone(&self.active));
        let callback = Arc::new(callback);
        let task_cancelled = Arc::clone(&cancelled);

        let task = self.handle.spawn(async move {
            let _guard = guard;
            let mut ticks = time::interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if task_cancelled.load(Ordering::Acquire) {
                    break;
                }
                let callback = Arc::clone(&callback);
                let tick_cancelled = Arc::clone(&task_cancelled);
                let outcome = tokio::task::spawn_blocking(move || {
                    if !tick_cancelled.load(Ordering::Acquire) {
                        callback();
                    }
                })
                .await;
                if let Err(error) = outcome {
                    tracing::warn!(registration = id, %error, "shared timer tick failed");
                }
            }
        });
        tracing::debug!(registration = id, ?interval, "shared timer registration added");

        Ok(TimerRegistration {
            id,
            cancelled,
            task: task.abort_handle(),
        })
    }

    /// Number of registrations whose task is still alive.
    ///
    /// Cancellation is observed asynchronously, so the count may briefly lag
    /// behind [`TimerRegistration::cancel`].
    pub fn active_registrations(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for SharedTimer {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            tracing::debug!("shared timer shut down");
        }
    }
}

impl fmt::Debug for SharedTimer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SharedTimer")
            .field("active_registrations", &self.active_registrations())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Configures a [`SharedTimer`].
#[derive(Debug, Clone)]
pub struct SharedTimerBuilder {
    worker_threads: usize,
    thread_name: String,
}

impl Default for SharedTimerBuilder {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get().clamp(1, 4),
            thread_name: "functors-shared-timer".to_string(),
        }
    }
}

impl SharedTimerBuilder {
    /// Number of runtime worker threads; values below one are raised to one.
    #[must_use]
    pub fn worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads.max(1);
        self
    }

    /// Name given to the runtime's threads.
    #[must_use]
    pub fn thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// Builds the timer and starts its runtime.
    ///
    /// # Errors
    ///
    /// Returns [`FunctorError::TimerStart`] when the runtime cannot be
    /// created.
    pub fn build(self) -> Result<SharedTimer, FunctorError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(self.worker_threads)
            .thread_name(self.thread_name)
            .enable_time()
            .build()?;
        tracing::debug!(worker_threads = self.worker_threads, "shared timer started");
        Ok(SharedTimer {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            next_registration: AtomicU64::new(0),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }
}

// =============================================================================
// Registration
// =============================================================================

/// One periodic callback attached to a [`SharedTimer`].
///
/// Cancelling (or dropping) the registration prevents every later tick. A
/// tick already handed to the blocking pool may still complete.
#[derive(Debug)]
pub struct TimerRegistration {
    id: u64,
    cancelled: Arc<AtomicBool>,
    task: AbortHandle,
}

impl TimerRegistration {
    /// Identifier, unique per timer.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Stops future ticks. Idempotent.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            self.task.abort();
            tracing::debug!(registration = self.id, "shared timer registration cancelled");
        }
    }
}

impl Drop for TimerRegistration {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_zero_interval_is_rejected() {
        let timer = SharedTimer::builder().worker_threads(1).build().unwrap();
        let result = timer.register(Duration::ZERO, || {});
        assert!(matches!(
            result,
            Err(FunctorError::InvalidArgument { argument: "interval", .. })
        ));
    }

    #[test]
    fn test_cancelled_registration_is_released() {
        let timer = SharedTimer::builder().worker_threads(1).build().unwrap();
        let registration = timer.register(Duration::from_millis(1), || {}).unwrap();
        assert_eq!(timer.active_registrations(), 1);
        assert!(!registration.is_cancelled());

        registration.cancel();
        registration.cancel();
        assert!(registration.is_cancelled());
        for _ in 0..200 {
            if timer.active_registrations() == 0 {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(timer.active_registrations(), 0);
    }

    #[test]
    fn test_registration_ids_are_distinct() {
        let timer = SharedTimer::builder().worker_threads(1).build().unwrap();
        let first = timer.register(Duration::from_secs(60), || {}).unwrap();
        let second = timer.register(Duration::from_secs(60), || {}).unwrap();
        assert_ne!(first.id(), second.id());
    }
}
