//! Actuator controller: the thread-safe command and query surface.
//!
//! Lock order is `lifecycle` then `state`. The cycle runner only ever takes
//! `state`, so `stop()` can join it while holding `lifecycle`.

use parking_lot::Mutex;
use relact_common::consts::MAX_PHASE_SECS;
use relact_common::relay::{ChannelPattern, RelayError};
use relact_hal::RelayBoard;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, StopSignal};
use crate::config::CycleConfig;
use crate::cycle::{CycleRunner, deadline_after};
use crate::error::ControlError;
use crate::state::MotionState;

/// Point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Current motion state.
    pub state: MotionState,
    /// Live wait interval in seconds.
    pub wait_seconds: f64,
    /// A run is active.
    pub running: bool,
    /// Fault that ended the last run, cleared by the next start.
    pub fault: Option<String>,
    /// Cycles begun in the current (or last) run.
    pub cycles: u64,
    /// Logical channel levels last written.
    pub channels: ChannelPattern,
}

impl StatusSnapshot {
    /// Live wait interval.
    pub fn wait(&self) -> Duration {
        Duration::from_secs_f64(self.wait_seconds)
    }
}

// ─── Shared State ───────────────────────────────────────────────────

/// Everything the runner and the command surface both touch.
pub(crate) struct ControlState {
    pub(crate) motion: MotionState,
    pub(crate) wait: Duration,
    pub(crate) running: bool,
    pub(crate) fault: Option<String>,
    pub(crate) cycles: u64,
    pub(crate) board: RelayBoard,
}

impl ControlState {
    /// Write the phase's entry pattern and make it current.
    ///
    /// Returns how long the phase lasts. On a failed write the motion state
    /// is left unchanged.
    pub(crate) fn enter(
        &mut self,
        phase: MotionState,
        config: &CycleConfig,
    ) -> Result<Duration, RelayError> {
        if let Some(pattern) = phase.pattern_on_entry() {
            self.board.apply(pattern)?;
        }
        self.motion = phase;
        if phase == MotionState::Extending {
            self.cycles += 1;
        }
        debug!("Entered {} (cycle {})", phase, self.cycles);
        Ok(config.fixed_duration(phase).unwrap_or(self.wait))
    }

    /// End the run and de-energize both channels.
    ///
    /// State is forced to `Stopped` even when the write fails.
    pub(crate) fn halt(&mut self) -> Result<(), RelayError> {
        self.motion = MotionState::Stopped;
        self.running = false;
        self.board.apply(ChannelPattern::RETRACT)
    }

    fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.motion,
            wait_seconds: self.wait.as_secs_f64(),
            running: self.running,
            fault: self.fault.clone(),
            cycles: self.cycles,
            channels: self.board.pattern(),
        }
    }
}

pub(crate) struct Shared {
    pub(crate) state: Mutex<ControlState>,
    pub(crate) config: CycleConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

/// One live background run.
struct RunHandle {
    stop: StopSignal,
    thread: JoinHandle<()>,
}

impl RunHandle {
    /// Signal the runner and wait for it to exit.
    fn finish(self) {
        self.stop.raise();
        if self.thread.join().is_err() {
            error!("Cycle runner panicked");
        }
    }
}

// ─── Controller ─────────────────────────────────────────────────────

/// Owns the relay board and the single cycle runner.
pub struct ActuatorController {
    shared: Arc<Shared>,
    lifecycle: Mutex<Option<RunHandle>>,
}

impl ActuatorController {
    /// Create a stopped controller around an opened board.
    pub fn new(board: RelayBoard, config: CycleConfig, clock: Arc<dyn Clock>) -> Self {
        info!(
            "Controller ready: initial_retract={:?} extend={:?} stop_gap={:?} retract={:?} wait={:?}",
            config.initial_retract, config.extend, config.stop_gap, config.retract, config.wait
        );
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControlState {
                    motion: MotionState::Stopped,
                    wait: config.wait,
                    running: false,
                    fault: None,
                    cycles: 0,
                    board,
                }),
                config,
                clock,
            }),
            lifecycle: Mutex::new(None),
        }
    }

    /// Begin cycling from `InitialRetracting`.
    ///
    /// # Errors
    /// `AlreadyRunning` if a run is active, `HardwareFault` if the initial
    /// retract cannot be written or the board has been released.
    pub fn start(&self) -> Result<(), ControlError> {
        let mut lifecycle = self.lifecycle.lock();
        if self.shared.state.lock().running {
            return Err(ControlError::AlreadyRunning);
        }
        // A faulted run has already exited; collect its thread.
        if let Some(old) = lifecycle.take() {
            old.finish();
        }

        let stop = StopSignal::new();
        let first_deadline = {
            let mut state = self.shared.state.lock();
            if state.board.is_released() {
                return Err(RelayError::Released.into());
            }
            state.fault = None;
            state.cycles = 0;
            let entered = state
                .enter(MotionState::InitialRetracting, &self.shared.config)
                .map_err(ControlError::from)
                .and_then(|d| deadline_after(self.shared.clock.as_ref(), d));
            match entered {
                Ok(deadline) => {
                    state.running = true;
                    deadline
                }
                Err(e) => {
                    if let Err(write_err) = state.halt() {
                        error!("Failed to de-energize after start failure: {}", write_err);
                    }
                    state.fault = Some(e.to_string());
                    error!("Start failed: {}", e);
                    return Err(e);
                }
            }
        };

        let runner = CycleRunner::new(Arc::clone(&self.shared), stop.clone());
        let spawned = thread::Builder::new()
            .name("relact-cycle".to_string())
            .spawn(move || runner.run(first_deadline));

        match spawned {
            Ok(thread) => {
                *lifecycle = Some(RunHandle { stop, thread });
                info!("Actuator cycling started");
                Ok(())
            }
            Err(e) => {
                let mut state = self.shared.state.lock();
                if let Err(write_err) = state.halt() {
                    error!("Failed to de-energize after spawn failure: {}", write_err);
                }
                Err(ControlError::SpawnFailed(e.to_string()))
            }
        }
    }

    /// Stop the active run and leave both channels de-energized.
    ///
    /// Returns after the runner thread has exited.
    ///
    /// # Errors
    /// `NotRunning` if no run is active, `HardwareFault` if the
    /// de-energizing write fails (the state is `Stopped` regardless).
    pub fn stop(&self) -> Result<(), ControlError> {
        let mut lifecycle = self.lifecycle.lock();
        let running = self.shared.state.lock().running;
        let Some(handle) = lifecycle.take() else {
            return Err(ControlError::NotRunning);
        };
        handle.finish();
        if !running {
            return Err(ControlError::NotRunning);
        }

        let mut state = self.shared.state.lock();
        let result = state.halt();
        match result {
            Ok(()) => {
                info!("Actuator cycling stopped after {} cycles", state.cycles);
                Ok(())
            }
            Err(e) => {
                error!("Failed to de-energize on stop: {}", e);
                state.fault = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Change the wait between cycles.
    ///
    /// Takes effect the next time `Waiting` is entered.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero duration or one longer than
    /// `MAX_PHASE_SECS`.
    pub fn set_wait_interval(&self, wait: Duration) -> Result<(), ControlError> {
        if wait.is_zero() {
            warn!("Rejected wait interval {:?}", wait);
            return Err(ControlError::InvalidArgument(
                "wait time must be positive".to_string(),
            ));
        }
        if wait > Duration::from_secs(MAX_PHASE_SECS) {
            warn!("Rejected wait interval {:?}", wait);
            return Err(ControlError::InvalidArgument(format!(
                "wait time must be at most {MAX_PHASE_SECS} seconds"
            )));
        }
        self.shared.state.lock().wait = wait;
        info!("Wait interval set to {:.3}s", wait.as_secs_f64());
        Ok(())
    }

    /// [`set_wait_interval`](Self::set_wait_interval) from seconds.
    ///
    /// # Errors
    /// `InvalidArgument` for zero, negative, NaN, infinite or out-of-range
    /// values.
    pub fn set_wait_seconds(&self, seconds: f64) -> Result<(), ControlError> {
        if !seconds.is_finite() || seconds <= 0.0 {
            warn!("Rejected wait time {}", seconds);
            return Err(ControlError::InvalidArgument(
                "wait time must be positive".to_string(),
            ));
        }
        let wait = Duration::try_from_secs_f64(seconds).map_err(|_| {
            ControlError::InvalidArgument(format!("wait time {seconds} is out of range"))
        })?;
        self.set_wait_interval(wait)
    }

    /// Current status.
    pub fn status(&self) -> StatusSnapshot {
        self.shared.state.lock().snapshot()
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().running
    }

    /// Stop any run, de-energize and release the relay lines.
    ///
    /// Safe to call more than once. After shutdown `start()` fails with a
    /// hardware fault.
    pub fn shutdown(&self) -> Result<(), ControlError> {
        match self.stop() {
            Ok(()) | Err(ControlError::NotRunning) => {}
            Err(e) => warn!("Stop during shutdown failed: {}", e),
        }

        let _lifecycle = self.lifecycle.lock();
        let mut state = self.shared.state.lock();
        if state.board.is_released() {
            return Ok(());
        }
        if let Err(e) = state.halt() {
            warn!("Failed to de-energize during shutdown: {}", e);
        }
        state.board.release()?;
        info!("Controller shut down");
        Ok(())
    }
}

impl Drop for ActuatorController {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Shutdown on drop failed: {}", e);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
