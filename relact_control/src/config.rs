//! Per-run cycle timing.

use relact_common::config::{ConfigError, CycleSettings};
use relact_common::consts::{
    DEFAULT_EXTEND_S, DEFAULT_INITIAL_RETRACT_S, DEFAULT_RETRACT_S, DEFAULT_STOP_GAP_S,
    DEFAULT_WAIT_S,
};
use std::time::Duration;

use crate::state::MotionState;

/// Phase durations for a run.
///
/// `wait` here is the startup value; the live interval is owned by the
/// controller and can change between runs and during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    /// Retract before the first cycle.
    pub initial_retract: Duration,
    /// Extend phase.
    pub extend: Duration,
    /// Retract phase.
    pub retract: Duration,
    /// Brief stop between extend and retract.
    pub stop_gap: Duration,
    /// Initial wait between cycles.
    pub wait: Duration,
}

impl CycleConfig {
    /// Build from TOML settings, rejecting durations that are not positive
    /// or exceed one week.
    pub fn from_settings(settings: &CycleSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_retract: CycleSettings::duration(
                "initial_retract_s",
                settings.initial_retract_s,
            )?,
            extend: CycleSettings::duration("extend_s", settings.extend_s)?,
            retract: CycleSettings::duration("retract_s", settings.retract_s)?,
            stop_gap: CycleSettings::duration("stop_gap_s", settings.stop_gap_s)?,
            wait: CycleSettings::duration("wait_s", settings.wait_s)?,
        })
    }

    /// Fixed duration of a timed phase; `None` for `Waiting` (live value)
    /// and `Stopped`.
    pub const fn fixed_duration(&self, state: MotionState) -> Option<Duration> {
        match state {
            MotionState::InitialRetracting => Some(self.initial_retract),
            MotionState::Extending => Some(self.extend),
            MotionState::Idling => Some(self.stop_gap),
            MotionState::Retracting => Some(self.retract),
            MotionState::Waiting | MotionState::Stopped => None,
        }
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            initial_retract: Duration::from_secs_f64(DEFAULT_INITIAL_RETRACT_S),
            extend: Duration::from_secs_f64(DEFAULT_EXTEND_S),
            retract: Duration::from_secs_f64(DEFAULT_RETRACT_S),
            stop_gap: Duration::from_secs_f64(DEFAULT_STOP_GAP_S),
            wait: Duration::from_secs_f64(DEFAULT_WAIT_S),
        }
    }
}
