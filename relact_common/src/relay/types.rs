//! Relay channel and logic level types.
//!
//! - `Channel` - Logical relay channel (1 or 2)
//! - `Level` - Physical line level
//! - `Polarity` - Energized → level translation (active-low / active-high)
//! - `ChannelPattern` - Logical energized flags for both channels

use serde::{Deserialize, Serialize};
use std::fmt;

use super::driver::RelayError;

/// Logical relay channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Relay channel 1.
    One,
    /// Relay channel 2.
    Two,
}

impl Channel {
    /// Both channels in write order.
    pub const ALL: [Channel; 2] = [Channel::One, Channel::Two];

    /// Zero-based index into per-channel arrays.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::One => 0,
            Channel::Two => 1,
        }
    }

    /// Channel number as printed on the board.
    #[inline]
    pub const fn number(self) -> u8 {
        match self {
            Channel::One => 1,
            Channel::Two => 2,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = RelayError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channel::One),
            2 => Ok(Channel::Two),
            other => Err(RelayError::InvalidChannel(other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.number())
    }
}

/// Physical logic level of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Line driven to 0 V.
    Low,
    /// Line driven to the supply rail.
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// Relay trigger polarity.
///
/// Low-level-trigger boards (the common opto-isolated modules) activate a
/// relay when the control line is pulled LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Energized = LOW.
    #[default]
    ActiveLow,
    /// Energized = HIGH.
    ActiveHigh,
}

impl Polarity {
    /// Polarity for a board, given whether it is low-level triggered.
    #[inline]
    pub const fn from_low_level_trigger(low_level: bool) -> Self {
        if low_level {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }

    /// Line level that puts a relay in the requested logical state.
    #[inline]
    pub const fn level_for(self, energized: bool) -> Level {
        match (self, energized) {
            (Polarity::ActiveLow, true) | (Polarity::ActiveHigh, false) => Level::Low,
            (Polarity::ActiveLow, false) | (Polarity::ActiveHigh, true) => Level::High,
        }
    }
}

/// Logical energized flags for both channels.
///
/// Current flows through the actuator when both channels sit at the same
/// level; a mismatched pair stops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelPattern {
    /// Channel 1 energized.
    pub ch1: bool,
    /// Channel 2 energized.
    pub ch2: bool,
}

impl ChannelPattern {
    /// Extend: both energized.
    pub const EXTEND: Self = Self { ch1: true, ch2: true };

    /// Retract (also the rest state): both de-energized.
    pub const RETRACT: Self = Self {
        ch1: false,
        ch2: false,
    };

    /// Brief stop: channel 1 only.
    pub const IDLE: Self = Self {
        ch1: true,
        ch2: false,
    };

    /// Energized flag for one channel.
    #[inline]
    pub const fn get(&self, channel: Channel) -> bool {
        match channel {
            Channel::One => self.ch1,
            Channel::Two => self.ch2,
        }
    }

    /// Set the energized flag for one channel.
    #[inline]
    pub fn set(&mut self, channel: Channel, energized: bool) {
        match channel {
            Channel::One => self.ch1 = energized,
            Channel::Two => self.ch2 = energized,
        }
    }

    /// Whether this pattern drives current through the actuator.
    #[inline]
    pub const fn drives_current(&self) -> bool {
        self.ch1 == self.ch2
    }
}
