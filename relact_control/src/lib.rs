//! # relact Control Library
//!
//! The actuator cycle controller. A single background runner drives the
//! relay board through timed phases while start, stop, reconfiguration and
//! status requests arrive concurrently from the request layer.
//!
//! ## Phase Sequence
//!
//! ```text
//! start ─► InitialRetracting ─► Extending ─► Idling ─► Retracting ─► Waiting
//!                                   ▲                                   │
//!                                   └───────────────────────────────────┘
//!                     any phase ──stop / hardware fault──► Stopped
//! ```
//!
//! ## Concurrency
//!
//! Motion state, wait interval, run flag, fault and the relay board share one
//! mutex. Every phase wait is cancellable through a [`clock::StopSignal`], and
//! time comes from an injectable [`clock::Clock`] so tests can run the cycle
//! on a simulated clock.

pub mod clock;
pub mod command;
pub mod config;
pub mod controller;
pub mod cycle;
pub mod error;
pub mod state;

pub use crate::controller::{ActuatorController, StatusSnapshot};
pub use crate::error::ControlError;
pub use crate::state::MotionState;
