//! Time source and cancellable waits.
//!
//! The cycle runner never sleeps directly. It asks a [`Clock`] to wait until
//! a deadline, and the wait returns early as soon as the run's
//! [`StopSignal`] is raised.
//!
//! - [`SystemClock`] - monotonic wall time (`Instant`)
//! - [`SimClock`] - manually advanced time for tests and benches

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The deadline was reached.
    Elapsed,
    /// The stop signal was raised first.
    Cancelled,
}

#[derive(Debug, Default)]
struct SignalInner {
    raised: Mutex<bool>,
    cv: Condvar,
}

/// One-shot cancellation signal shared by a run and its controller.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<SignalInner>,
}

impl StopSignal {
    /// Create a signal in the lowered state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal and wake every waiter.
    pub fn raise(&self) {
        let mut raised = self.inner.raised.lock();
        *raised = true;
        self.inner.cv.notify_all();
    }

    /// Whether the signal has been raised.
    pub fn is_raised(&self) -> bool {
        *self.inner.raised.lock()
    }

    /// Wake waiters so they re-check their deadline.
    fn wake(&self) {
        let _raised = self.inner.raised.lock();
        self.inner.cv.notify_all();
    }
}

/// Monotonic time source with cancellable waits.
pub trait Clock: Send + Sync {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;

    /// Block until `now() >= deadline` or `stop` is raised.
    ///
    /// A raised signal wins over an elapsed deadline.
    fn wait_until(&self, deadline: Duration, stop: &StopSignal) -> WaitOutcome;
}

/// Wall-clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Clock whose origin is the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wait_until(&self, deadline: Duration, stop: &StopSignal) -> WaitOutcome {
        let mut raised = stop.inner.raised.lock();
        loop {
            if *raised {
                return WaitOutcome::Cancelled;
            }
            let now = self.now();
            if now >= deadline {
                return WaitOutcome::Elapsed;
            }
            stop.inner.cv.wait_for(&mut raised, deadline - now);
        }
    }
}

#[derive(Debug)]
struct Sleeper {
    id: u64,
    deadline: Duration,
    signal: StopSignal,
}

/// Simulated clock advanced explicitly with [`SimClock::advance`].
///
/// Waiters block on their own stop signal's condvar; `advance` wakes every
/// registered waiter so it can re-check its deadline.
#[derive(Debug, Default)]
pub struct SimClock {
    now: Mutex<Duration>,
    sleepers: Mutex<Vec<Sleeper>>,
    parked: Condvar,
    next_id: AtomicU64,
}

impl SimClock {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward and wake all waiters.
    pub fn advance(&self, by: Duration) {
        {
            let mut now = self.now.lock();
            *now += by;
        }
        let sleepers = self.sleepers.lock();
        for sleeper in sleepers.iter() {
            sleeper.signal.wake();
        }
    }

    /// Number of threads currently inside `wait_until`.
    pub fn sleeping(&self) -> usize {
        self.sleepers.lock().len()
    }

    /// Earliest deadline among current waiters.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.sleepers.lock().iter().map(|s| s.deadline).min()
    }

    /// Block (in real time, up to `timeout`) until some waiter is parked on
    /// a deadline that has not yet been reached.
    ///
    /// After `advance`, this is the point where the runner has finished
    /// reacting and is waiting out its next phase.
    pub fn settle(&self, timeout: Duration) -> bool {
        let give_up = Instant::now() + timeout;
        let mut sleepers = self.sleepers.lock();
        loop {
            let now = *self.now.lock();
            if sleepers
                .iter()
                .any(|s| s.deadline > now && !s.signal.is_raised())
            {
                return true;
            }
            if self.parked.wait_until(&mut sleepers, give_up).timed_out() {
                let now = *self.now.lock();
                return sleepers
                    .iter()
                    .any(|s| s.deadline > now && !s.signal.is_raised());
            }
        }
    }

    fn register(&self, deadline: Duration, signal: &StopSignal) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut sleepers = self.sleepers.lock();
        sleepers.push(Sleeper {
            id,
            deadline,
            signal: signal.clone(),
        });
        self.parked.notify_all();
        id
    }

    fn unregister(&self, id: u64) {
        let mut sleepers = self.sleepers.lock();
        sleepers.retain(|s| s.id != id);
        self.parked.notify_all();
    }
}

impl Clock for SimClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }

    fn wait_until(&self, deadline: Duration, stop: &StopSignal) -> WaitOutcome {
        let id = self.register(deadline, stop);
        let outcome = {
            let mut raised = stop.inner.raised.lock();
            loop {
                if *raised {
                    break WaitOutcome::Cancelled;
                }
                if self.now() >= deadline {
                    break WaitOutcome::Elapsed;
                }
                stop.inner.cv.wait(&mut raised);
            }
        };
        self.unregister(id);
        outcome
    }
}
