//! Background cycle runner.
//!
//! One runner per run. It waits out the current phase, then moves to the
//! next one under the controller's state lock, so relay writes never
//! interleave with the stop teardown.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::clock::{Clock, StopSignal, WaitOutcome};
use crate::controller::Shared;
use crate::error::ControlError;
use crate::state::MotionState;

/// Clock reading `length` from now.
pub(crate) fn deadline_after(
    clock: &dyn Clock,
    length: Duration,
) -> Result<Duration, ControlError> {
    clock.now().checked_add(length).ok_or_else(|| {
        ControlError::InvalidArgument(format!(
            "phase deadline {length:?} from now is out of range"
        ))
    })
}

/// Drives the phase sequence until stopped or faulted.
pub(crate) struct CycleRunner {
    shared: Arc<Shared>,
    stop: StopSignal,
}

impl CycleRunner {
    pub(crate) fn new(shared: Arc<Shared>, stop: StopSignal) -> Self {
        Self { shared, stop }
    }

    /// Run until the stop signal is raised or a relay write fails.
    ///
    /// The controller has already entered `InitialRetracting`; `deadline`
    /// is when that phase ends.
    pub(crate) fn run(self, mut deadline: Duration) {
        debug!("Cycle runner started");
        loop {
            if self.shared.clock.wait_until(deadline, &self.stop) == WaitOutcome::Cancelled {
                break;
            }
            match self.advance() {
                Ok(Some(next)) => deadline = next,
                Ok(None) => break,
                Err(e) => {
                    self.abort(e);
                    break;
                }
            }
        }
        debug!("Cycle runner exited");
    }

    /// Enter the phase after the current one; returns its deadline, or
    /// `None` once the run has been told to stop.
    fn advance(&self) -> Result<Option<Duration>, ControlError> {
        let mut state = self.shared.state.lock();
        if self.stop.is_raised() || !state.running {
            return Ok(None);
        }
        let Some(next) = state.motion.next_on_timeout() else {
            return Ok(None);
        };
        let length = state.enter(next, &self.shared.config)?;
        if next == MotionState::Waiting {
            info!(
                "Cycle {} complete, waiting {:.1}s",
                state.cycles,
                length.as_secs_f64()
            );
        }
        deadline_after(self.shared.clock.as_ref(), length).map(Some)
    }

    /// End the run after a failed write.
    fn abort(&self, err: ControlError) {
        let mut state = self.shared.state.lock();
        let phase = state.motion;
        if let Err(e) = state.halt() {
            error!("Failed to de-energize after fault: {}", e);
        }
        error!("Run aborted in {}: {}", phase, err);
        state.fault = Some(err.to_string());
    }
}
