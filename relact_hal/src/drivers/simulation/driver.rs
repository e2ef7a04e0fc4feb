//! Simulation driver implementation.
//!
//! `SimulationDriver` keeps line state in memory behind a shared mutex so a
//! `SimProbe` can inspect it from tests and from the daemon's `--simulate`
//! mode.

use parking_lot::Mutex;
use relact_common::relay::{Level, LineDriver, RelayError};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// State of one simulated line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SimLine {
    level: Level,
}

#[derive(Debug, Default)]
struct SimLines {
    /// Claimed lines.
    lines: HashMap<u8, SimLine>,
    /// Every successful write, in order.
    history: Vec<(u8, Level)>,
    /// Remaining writes that fail regardless of pin.
    fail_next: u32,
    /// Pins whose writes fail until healed.
    failing_pins: HashSet<u8>,
    /// Number of release calls on claimed lines.
    releases: u32,
}

/// Simulation driver implementing the `LineDriver` trait.
pub struct SimulationDriver {
    /// Driver name
    name: &'static str,
    /// Driver version
    version: &'static str,
    /// Shared line state
    lines: Arc<Mutex<SimLines>>,
}

impl SimulationDriver {
    /// Create a new simulation driver instance.
    pub fn new() -> Self {
        Self {
            name: "simulation",
            version: env!("CARGO_PKG_VERSION"),
            lines: Arc::new(Mutex::new(SimLines::default())),
        }
    }

    /// Handle for observing and faulting this driver's lines.
    pub fn probe(&self) -> SimProbe {
        SimProbe {
            lines: Arc::clone(&self.lines),
        }
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn version(&self) -> &'static str {
        self.version
    }

    fn claim(&mut self, pin: u8, initial: Level) -> Result<(), RelayError> {
        let mut sim = self.lines.lock();
        if sim.lines.contains_key(&pin) {
            return Err(RelayError::InitFailed(format!("pin {pin} already claimed")));
        }
        sim.lines.insert(pin, SimLine { level: initial });
        info!("Simulated pin {} claimed as output ({})", pin, initial);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), RelayError> {
        let mut sim = self.lines.lock();
        if sim.fail_next > 0 {
            sim.fail_next -= 1;
            return Err(RelayError::HardwareFault {
                pin,
                reason: "injected fault".to_string(),
            });
        }
        if sim.failing_pins.contains(&pin) {
            return Err(RelayError::HardwareFault {
                pin,
                reason: "injected pin fault".to_string(),
            });
        }
        let Some(line) = sim.lines.get_mut(&pin) else {
            return Err(RelayError::HardwareFault {
                pin,
                reason: "pin not claimed".to_string(),
            });
        };
        line.level = level;
        sim.history.push((pin, level));
        debug!("Simulated pin {} -> {}", pin, level);
        Ok(())
    }

    fn release(&mut self, pin: u8) -> Result<(), RelayError> {
        let mut sim = self.lines.lock();
        if sim.lines.remove(&pin).is_some() {
            sim.releases += 1;
            debug!("Simulated pin {} released", pin);
        }
        Ok(())
    }
}

/// Observer and fault injector for a [`SimulationDriver`].
#[derive(Clone)]
pub struct SimProbe {
    lines: Arc<Mutex<SimLines>>,
}

impl SimProbe {
    /// Current level of a claimed pin, `None` if not claimed.
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.lines.lock().lines.get(&pin).map(|l| l.level)
    }

    /// Whether the pin is currently claimed.
    pub fn is_claimed(&self, pin: u8) -> bool {
        self.lines.lock().lines.contains_key(&pin)
    }

    /// Successful writes in order.
    pub fn history(&self) -> Vec<(u8, Level)> {
        self.lines.lock().history.clone()
    }

    /// Forget recorded writes.
    pub fn clear_history(&self) {
        self.lines.lock().history.clear();
    }

    /// Make the next `count` writes fail.
    pub fn fail_next_writes(&self, count: u32) {
        self.lines.lock().fail_next = count;
    }

    /// Make every write to `pin` fail until [`SimProbe::heal`].
    pub fn fail_pin(&self, pin: u8) {
        self.lines.lock().failing_pins.insert(pin);
    }

    /// Clear all injected faults.
    pub fn heal(&self) {
        let mut sim = self.lines.lock();
        sim.fail_next = 0;
        sim.failing_pins.clear();
    }

    /// Number of lines released so far.
    pub fn release_count(&self) -> u32 {
        self.lines.lock().releases
    }
}
