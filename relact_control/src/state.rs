//! Motion state and phase transition table.
//!
//! | State | Relay pattern | Next on timeout |
//! |-------|---------------|-----------------|
//! | InitialRetracting | RETRACT | Extending |
//! | Extending | EXTEND | Idling |
//! | Idling | IDLE | Retracting |
//! | Retracting | RETRACT | Waiting |
//! | Waiting | unchanged (RETRACT) | Extending |
//!
//! A stop signal or hardware fault takes any state to `Stopped`.

use relact_common::relay::ChannelPattern;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current motion state of the actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    /// No run active.
    #[default]
    Stopped,
    /// Retracting before the first cycle of a run.
    InitialRetracting,
    /// Extending.
    Extending,
    /// Brief stop between extend and retract.
    Idling,
    /// Retracting.
    Retracting,
    /// Waiting before the next cycle.
    Waiting,
}

impl MotionState {
    /// State entered when the current phase's duration elapses.
    ///
    /// `Stopped` has no timed successor.
    pub const fn next_on_timeout(self) -> Option<MotionState> {
        use MotionState::*;
        match self {
            Stopped => None,
            InitialRetracting => Some(Extending),
            Extending => Some(Idling),
            Idling => Some(Retracting),
            Retracting => Some(Waiting),
            // Restart the cycle; InitialRetracting only runs once per run.
            Waiting => Some(Extending),
        }
    }

    /// Relay pattern that must be on the lines while in this state.
    pub const fn pattern(self) -> ChannelPattern {
        use MotionState::*;
        match self {
            Extending => ChannelPattern::EXTEND,
            Idling => ChannelPattern::IDLE,
            Stopped | InitialRetracting | Retracting | Waiting => ChannelPattern::RETRACT,
        }
    }

    /// Pattern to write when entering this state, `None` to leave the lines
    /// as they are.
    pub const fn pattern_on_entry(self) -> Option<ChannelPattern> {
        match self {
            MotionState::Waiting => None,
            other => Some(other.pattern()),
        }
    }

    /// Whether the state only exists while a run is active.
    #[inline]
    pub const fn is_active(self) -> bool {
        !matches!(self, MotionState::Stopped)
    }

    /// Lowercase name used in logs and the API.
    pub const fn as_str(self) -> &'static str {
        use MotionState::*;
        match self {
            Stopped => "stopped",
            InitialRetracting => "initial_retracting",
            Extending => "extending",
            Idling => "idling",
            Retracting => "retracting",
            Waiting => "waiting",
        }
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
