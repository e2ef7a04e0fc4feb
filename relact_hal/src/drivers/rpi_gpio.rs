//! Raspberry Pi GPIO driver (BCM numbering) built on `rppal`.
//!
//! Claimed pins are kept as `OutputPin`s with reset-on-drop disabled so a
//! level survives process exit unless the line is explicitly released.

use relact_common::relay::{Level, LineDriver, RelayError};
use rppal::gpio::{self, Gpio, OutputPin};
use std::collections::HashMap;
use tracing::{debug, info};

/// `rppal`-backed line driver.
pub struct RppalDriver {
    gpio: Option<Gpio>,
    pins: HashMap<u8, OutputPin>,
}

impl RppalDriver {
    /// Create the driver; the GPIO peripheral is opened on first claim.
    pub fn new() -> Self {
        Self {
            gpio: None,
            pins: HashMap::new(),
        }
    }

    fn gpio(&mut self) -> Result<&Gpio, RelayError> {
        if self.gpio.is_none() {
            let gpio = Gpio::new()
                .map_err(|e| RelayError::InitFailed(format!("cannot open GPIO: {e}")))?;
            self.gpio = Some(gpio);
        }
        self.gpio
            .as_ref()
            .ok_or_else(|| RelayError::InitFailed("GPIO unavailable".to_string()))
    }
}

impl Default for RppalDriver {
    fn default() -> Self {
        Self::new()
    }
}

fn to_rppal(level: Level) -> gpio::Level {
    match level {
        Level::Low => gpio::Level::Low,
        Level::High => gpio::Level::High,
    }
}

impl LineDriver for RppalDriver {
    fn name(&self) -> &'static str {
        "rppal"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn claim(&mut self, pin: u8, initial: Level) -> Result<(), RelayError> {
        if self.pins.contains_key(&pin) {
            return Err(RelayError::InitFailed(format!("pin {pin} already claimed")));
        }
        let line = self
            .gpio()?
            .get(pin)
            .map_err(|e| RelayError::InitFailed(format!("pin {pin}: {e}")))?;
        let mut out = match initial {
            Level::Low => line.into_output_low(),
            Level::High => line.into_output_high(),
        };
        out.set_reset_on_drop(false);
        self.pins.insert(pin, out);
        info!("GPIO {} claimed as output ({})", pin, initial);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), RelayError> {
        let out = self.pins.get_mut(&pin).ok_or_else(|| RelayError::HardwareFault {
            pin,
            reason: "pin not claimed".to_string(),
        })?;
        out.write(to_rppal(level));
        debug!("GPIO {} -> {}", pin, level);
        Ok(())
    }

    fn release(&mut self, pin: u8) -> Result<(), RelayError> {
        if let Some(mut out) = self.pins.remove(&pin) {
            // Dropping with reset enabled restores the pin's original mode.
            out.set_reset_on_drop(true);
            drop(out);
            debug!("GPIO {} released", pin);
        }
        Ok(())
    }
}

/// Factory function to create an rppal driver instance.
pub fn create_driver() -> Box<dyn LineDriver> {
    Box::new(RppalDriver::new())
}
