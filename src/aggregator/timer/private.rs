//! Dedicated-thread timer.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::FunctorError;

struct StopSignal {
    stopped: Mutex<bool>,
    wakeup: Condvar,
}

/// Runs a callback on its own thread every `interval`, measured from the end
/// of the previous run.
pub(crate) struct PrivateTimer {
    signal: Arc<StopSignal>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl PrivateTimer {
    pub(crate) fn start<F>(interval: Duration, callback: F) -> Result<Self, FunctorError>
    where
        F: Fn() + Send + 'static,
    {
        let signal = Arc::new(StopSignal {
            stopped: Mutex::new(false),
            wakeup: Condvar::new(),
        });
        let worker_signal = Arc::clone(&signal);
        let worker = thread::Builder::new()
            .name("functors-timer".to_string())
            .spawn(move || tick_loop(&worker_signal, interval, &callback))?;
        tracing::debug!(?interval, "private timer started");
        Ok(Self {
            signal,
            worker: Mutex::new(Some(worker)),
        })
    }

    /// Stops the timer and waits for an in-flight tick.
    ///
    /// Called from the timer thread itself (a tick stopping its own
    /// aggregator) the wait is skipped; the loop exits once the tick returns.
    pub(crate) fn cancel(&self) {
        {
            let mut stopped = self.signal.stopped.lock();
            if *stopped {
                return;
            }
            *stopped = true;
        }
        self.signal.wakeup.notify_all();

        let Some(worker) = self.worker.lock().take() else {
            return;
        };
        if worker.thread().id() == thread::current().id() {
            tracing::debug!("private timer cancelled from its own tick");
            return;
        }
        if worker.join().is_err() {
            tracing::warn!("private timer thread terminated by a panic");
        }
        tracing::debug!("private timer cancelled");
    }
}

impl Drop for PrivateTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for PrivateTimer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PrivateTimer")
            .field("stopped", &*self.signal.stopped.lock())
            .finish_non_exhaustive()
    }
}

fn tick_loop<F: Fn()>(signal: &StopSignal, interval: Duration, callback: &F) {
    loop {
        let deadline = Instant::now() + interval;
        {
            let mut stopped = signal.stopped.lock();
            while !*stopped {
                if signal.wakeup.wait_until(&mut stopped, deadline).timed_out() {
                    break;
                }
            }
            if *stopped {
                break;
            }
        }
        tracing::trace!("private timer tick");
        if panic::catch_unwind(AssertUnwindSafe(callback)).is_err() {
            tracing::warn!("private timer tick panicked; the timer keeps running");
        }
    }
    tracing::trace!("private timer thread exiting");
}
