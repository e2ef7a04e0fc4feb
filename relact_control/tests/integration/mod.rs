//! Shared rig for controller integration tests.

#![allow(dead_code)]

mod cycle_sequence;
mod fault;
mod idempotence;
mod stop_latency;
mod wait_interval;

use relact_common::config::RelayConfig;
use relact_common::relay::{ChannelPattern, Level};
use relact_control::clock::{Clock, SimClock};
use relact_control::config::CycleConfig;
use relact_control::{ActuatorController, MotionState};
use relact_hal::RelayBoard;
use relact_hal::drivers::simulation::{SimProbe, SimulationDriver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Real-time bound for the runner to react to a clock step.
pub const SETTLE: Duration = Duration::from_secs(5);

pub const CH1_PIN: u8 = 18;
pub const CH2_PIN: u8 = 23;

/// Controller on a simulated board and clock.
pub struct Rig {
    pub ctrl: Arc<ActuatorController>,
    pub clock: Arc<SimClock>,
    pub probe: SimProbe,
    pub config: CycleConfig,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(CycleConfig::default())
    }

    pub fn with_config(config: CycleConfig) -> Self {
        let driver = SimulationDriver::new();
        let probe = driver.probe();
        let board = RelayBoard::open(Box::new(driver), &RelayConfig::default()).unwrap();
        let clock = Arc::new(SimClock::new());
        let ctrl = Arc::new(ActuatorController::new(board, config, clock.clone()));
        Self {
            ctrl,
            clock,
            probe,
            config,
        }
    }

    /// Start and wait until the runner is parked in `InitialRetracting`.
    pub fn start(&self) {
        self.ctrl.start().unwrap();
        assert!(self.clock.settle(SETTLE), "runner never parked after start");
    }

    /// Advance simulated time and wait for the runner to park again.
    pub fn step(&self, by: Duration) {
        self.clock.advance(by);
        assert!(self.clock.settle(SETTLE), "runner never parked after {by:?}");
    }

    /// Advance through the current phase exactly.
    pub fn finish_phase(&self) {
        let deadline = self.clock.next_deadline().expect("runner is not waiting");
        self.step(deadline - self.clock.now());
    }

    pub fn state(&self) -> MotionState {
        self.ctrl.status().state
    }

    /// Logical pattern read back from the simulated lines (active-low board).
    pub fn lines(&self) -> ChannelPattern {
        let energized = |pin| self.probe.level(pin) == Some(Level::Low);
        ChannelPattern {
            ch1: energized(CH1_PIN),
            ch2: energized(CH2_PIN),
        }
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let give_up = Instant::now() + timeout;
    while Instant::now() < give_up {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}
