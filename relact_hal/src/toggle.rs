//! One-shot pin set for the `relact_pin` utility.
//!
//! Claims a single line, drives it to the level for the requested logical
//! state, and optionally releases it again. No state outlives the call.

use relact_common::consts::{MAX_GPIO_PIN, MIN_GPIO_PIN};
use relact_common::relay::{Level, LineDriver, Polarity, RelayError};
use tracing::info;

/// Driver used when none is named: the GPIO backend when it is compiled
/// in, the simulation driver otherwise.
#[cfg(feature = "rpi")]
pub const DEFAULT_PIN_DRIVER: &str = "rppal";
/// Driver used when none is named: the GPIO backend when it is compiled
/// in, the simulation driver otherwise.
#[cfg(not(feature = "rpi"))]
pub const DEFAULT_PIN_DRIVER: &str = "simulation";

/// A single set request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRequest {
    /// BCM pin number.
    pub pin: u8,
    /// Requested logical state (`true` = on).
    pub on: bool,
    /// Trigger polarity of the device on the pin.
    pub polarity: Polarity,
    /// Release the line after setting it.
    pub cleanup: bool,
}

/// Whether `pin` is a general-purpose BCM pin on the 40-pin header.
#[inline]
pub fn is_common_gpio(pin: u8) -> bool {
    (MIN_GPIO_PIN..=MAX_GPIO_PIN).contains(&pin)
}

/// Whether writes through `driver` reach real GPIO lines.
#[inline]
pub fn touches_hardware(driver: &dyn LineDriver) -> bool {
    driver.name() != "simulation"
}

/// Apply `req` through `driver`; returns the level that was driven.
///
/// The line is first claimed in its "off" level, then driven to the
/// requested level, so an "on" request never glitches through an
/// unintended state first.
pub fn set_pin(driver: &mut dyn LineDriver, req: &PinRequest) -> Result<Level, RelayError> {
    let level = req.polarity.level_for(req.on);

    driver.claim(req.pin, req.polarity.level_for(false))?;
    if let Err(e) = driver.write(req.pin, level) {
        let _ = driver.release(req.pin);
        return Err(e);
    }
    info!(
        "GPIO {} set to {} ({}{})",
        req.pin,
        if req.on { "ON" } else { "OFF" },
        level,
        if req.polarity == Polarity::ActiveLow {
            " - low-level trigger device"
        } else {
            ""
        }
    );

    if req.cleanup {
        driver.release(req.pin)?;
        info!("GPIO {} released", req.pin);
    }
    Ok(level)
}
