//! Relay vocabulary and line driver contract.
//!
//! This module contains the types shared between the relay board, the
//! cycle controller and the pin tool.

pub mod driver;
pub mod types;

pub use driver::{DriverFactory, LineDriver, RelayError};
pub use types::{Channel, ChannelPattern, Level, Polarity};
