//! Line driver trait and error types.
//!
//! This module defines:
//! - `LineDriver` trait - Interface for pluggable GPIO backends
//! - `RelayError` enum - Error types for relay operations
//! - `DriverFactory` type alias - Factory function type

use super::types::Level;
use thiserror::Error;

/// Error types for relay operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// A line could not be driven or released.
    #[error("Hardware fault on pin {pin}: {reason}")]
    HardwareFault {
        /// BCM pin number.
        pin: u8,
        /// Backend-reported reason.
        reason: String,
    },

    /// Channel number outside `1..=2`.
    #[error("Invalid relay channel {0} (expected 1 or 2)")]
    InvalidChannel(u8),

    /// Driver not found in the registry.
    #[error("Driver not found: {0}")]
    DriverNotFound(String),

    /// Driver or line acquisition failed.
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Lines were already released.
    #[error("Relay lines already released")]
    Released,
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn LineDriver>;

/// Trait defining the interface for GPIO line drivers.
///
/// The relay board owns one driver and talks to it in physical terms only
/// (pin numbers and levels). Polarity and motion knowledge live above it.
///
/// # Lifecycle
///
/// 1. `claim()` - Once per line at startup, with the initial level
/// 2. `write()` - Any number of times
/// 3. `release()` - Once per line on shutdown
pub trait LineDriver: Send {
    /// Returns the driver's unique identifier (e.g., "simulation", "rppal").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Configure `pin` as an output and drive it to `initial`.
    ///
    /// # Errors
    /// Return `RelayError::InitFailed` if the line cannot be acquired.
    fn claim(&mut self, pin: u8, initial: Level) -> Result<(), RelayError>;

    /// Drive a claimed line to `level`.
    ///
    /// # Errors
    /// Return `RelayError::HardwareFault` if the line cannot be driven.
    fn write(&mut self, pin: u8, level: Level) -> Result<(), RelayError>;

    /// Return a line to its neutral (input / high-impedance) state.
    ///
    /// Releasing a line that is not claimed is not an error.
    fn release(&mut self, pin: u8) -> Result<(), RelayError>;
}
