//! Periodic timers driving aggregator ticks.
//!
//! Two scheduling modes are available:
//!
//! - **Private**: one dedicated OS thread per aggregator, waking at a fixed
//!   delay. Cancelling a private timer waits for an in-flight tick, so no tick
//!   runs after [`TimedAggregator::stop`](super::TimedAggregator::stop)
//!   returns (unless `stop` is called from inside a tick).
//! - **Shared**: a [`SharedTimer`] service multiplexing many registrations on
//!   a small tokio runtime. Cancellation prevents future ticks but does not
//!   wait for one that was already dispatched.
//!
//! A process-wide shared timer is available through [`SharedTimer::global`];
//! callers wanting isolation (tests in particular) build their own with
//! [`SharedTimer::builder`].

mod private;
mod shared;

use std::sync::Arc;
use std::time::Duration;

use crate::error::FunctorError;

use private::PrivateTimer;
pub use shared::{SharedTimer, SharedTimerBuilder, TimerRegistration};

/// Selects where an aggregator's ticks are scheduled.
#[derive(Debug, Clone, Default)]
pub enum TimerMode {
    /// A dedicated timer thread.
    #[default]
    Private,
    /// A registration on the given shared timer.
    Shared(Arc<SharedTimer>),
}

impl TimerMode {
    /// Shared mode on the process-wide [`SharedTimer::global`].
    #[must_use]
    pub fn global() -> Self {
        Self::Shared(SharedTimer::global())
    }
}

/// A running timer owned by an aggregator.
#[derive(Debug)]
pub(crate) struct Timer {
    interval: Duration,
    kind: TimerKind,
}

#[derive(Debug)]
enum TimerKind {
    Private(PrivateTimer),
    /// The service is owned alongside the registration: dropping the last
    /// `Arc<SharedTimer>` shuts its runtime down.
    Shared {
        registration: TimerRegistration,
        service: Arc<SharedTimer>,
    },
}

impl Timer {
    pub(crate) fn start<F>(
        interval: Duration,
        mode: TimerMode,
        callback: F,
    ) -> Result<Self, FunctorError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let kind = match mode {
            TimerMode::Private => TimerKind::Private(PrivateTimer::start(interval, callback)?),
            TimerMode::Shared(service) => TimerKind::Shared {
                registration: service.register(interval, callback)?,
                service,
            },
        };
        Ok(Self { interval, kind })
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn cancel(&self) {
        match &self.kind {
            TimerKind::Private(timer) => timer.cancel(),
            TimerKind::Shared { registration, .. } => registration.cancel(),
        }
    }
}
