//! Relay board: logical channels on top of a line driver.
//!
//! The board knows which pin each channel is wired to and how the board is
//! triggered. It has no notion of motion; callers hand it energized flags.

use relact_common::config::RelayConfig;
use relact_common::consts::CHANNEL_COUNT;
use relact_common::relay::{Channel, ChannelPattern, LineDriver, Polarity, RelayError};
use tracing::{debug, error, info};

/// Two-channel relay board.
pub struct RelayBoard {
    /// Backend that drives the physical lines.
    driver: Box<dyn LineDriver>,
    /// BCM pin per channel, indexed by `Channel::index()`.
    pins: [u8; CHANNEL_COUNT],
    /// Shared trigger polarity.
    polarity: Polarity,
    /// Last logical state successfully written.
    pattern: ChannelPattern,
    /// Lines have been handed back to the driver.
    released: bool,
}

impl RelayBoard {
    /// Claim both channel lines and leave them de-energized.
    ///
    /// # Errors
    /// `RelayError::ConfigError` for an invalid pin assignment, or the
    /// driver's error if a line cannot be claimed.
    pub fn open(mut driver: Box<dyn LineDriver>, config: &RelayConfig) -> Result<Self, RelayError> {
        config
            .validate()
            .map_err(|e| RelayError::ConfigError(e.to_string()))?;

        let polarity = config.polarity();
        let pins = [config.channel_1_pin, config.channel_2_pin];
        let idle = polarity.level_for(false);

        for (idx, pin) in pins.iter().enumerate() {
            if let Err(e) = driver.claim(*pin, idle) {
                // Hand back whatever was claimed before failing.
                for claimed in &pins[..idx] {
                    let _ = driver.release(*claimed);
                }
                return Err(e);
            }
        }

        info!(
            "Relay board ready on {} v{}: ch1=GPIO{} ch2=GPIO{} ({:?})",
            driver.name(),
            driver.version(),
            pins[0],
            pins[1],
            polarity
        );

        Ok(Self {
            driver,
            pins,
            polarity,
            pattern: ChannelPattern::RETRACT,
            released: false,
        })
    }

    /// Energize or de-energize one channel.
    pub fn set_channel(&mut self, channel: Channel, energized: bool) -> Result<(), RelayError> {
        if self.released {
            return Err(RelayError::Released);
        }
        let pin = self.pins[channel.index()];
        let level = self.polarity.level_for(energized);
        self.driver.write(pin, level)?;
        self.pattern.set(channel, energized);
        debug!("{} (GPIO{}) energized={} -> {}", channel, pin, energized, level);
        Ok(())
    }

    /// Write both channels, channel 1 first.
    pub fn apply(&mut self, pattern: ChannelPattern) -> Result<(), RelayError> {
        for channel in Channel::ALL {
            self.set_channel(channel, pattern.get(channel))?;
        }
        Ok(())
    }

    /// Last logical state written to the lines.
    #[inline]
    pub fn pattern(&self) -> ChannelPattern {
        self.pattern
    }

    /// Pin wired to `channel`.
    #[inline]
    pub fn pin(&self, channel: Channel) -> u8 {
        self.pins[channel.index()]
    }

    /// Board trigger polarity.
    #[inline]
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Name of the underlying line driver.
    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    /// Whether `release()` has run.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release both lines. Safe to call more than once.
    ///
    /// Both lines are always attempted; the first error is returned.
    pub fn release(&mut self) -> Result<(), RelayError> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let mut first_err = None;
        for pin in self.pins {
            if let Err(e) = self.driver.release(pin) {
                error!("Failed to release GPIO{}: {}", pin, e);
                first_err.get_or_insert(e);
            }
        }
        info!("Relay lines released");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
