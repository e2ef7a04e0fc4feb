//! Configuration loading traits and types.
//!
//! This module provides the TOML configuration model for the relact daemon
//! and a standardized way to load it.
//!
//! # Usage
//!
//! ```rust,no_run
//! use relact_common::config::{ConfigError, ConfigLoader, RelactConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = RelactConfig::load(Path::new("relact.toml"))?;
//!     config.validate()?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::consts::{
    DEFAULT_BIND, DEFAULT_CHANNEL_1_PIN, DEFAULT_CHANNEL_2_PIN, DEFAULT_DRIVER,
    DEFAULT_EXTEND_S, DEFAULT_INITIAL_RETRACT_S, DEFAULT_RETRACT_S, DEFAULT_STOP_GAP_S,
    DEFAULT_WAIT_S, MAX_PHASE_SECS, SERVICE_NAME,
};
use crate::relay::Polarity;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "relact-bench-01"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_service_name() -> String {
    SERVICE_NAME.to_string()
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Relay board wiring.
///
/// ```toml
/// [relay]
/// driver = "rppal"
/// channel_1_pin = 18
/// channel_2_pin = 23
/// low_level_trigger = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Line driver name (see the HAL driver registry).
    pub driver: String,
    /// BCM pin wired to relay channel 1.
    pub channel_1_pin: u8,
    /// BCM pin wired to relay channel 2.
    pub channel_2_pin: u8,
    /// Board activates a relay when its line is LOW.
    pub low_level_trigger: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.to_string(),
            channel_1_pin: DEFAULT_CHANNEL_1_PIN,
            channel_2_pin: DEFAULT_CHANNEL_2_PIN,
            low_level_trigger: true,
        }
    }
}

impl RelayConfig {
    /// Polarity shared by both channels.
    #[inline]
    pub const fn polarity(&self) -> Polarity {
        Polarity::from_low_level_trigger(self.low_level_trigger)
    }

    /// Validate pin assignment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_1_pin == self.channel_2_pin {
            return Err(ConfigError::ValidationError(format!(
                "channel_1_pin and channel_2_pin are both {}",
                self.channel_1_pin
            )));
        }
        if self.driver.is_empty() {
            return Err(ConfigError::ValidationError(
                "relay.driver cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Phase durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleSettings {
    /// Retract before the first cycle of a run.
    pub initial_retract_s: f64,
    /// Extend phase.
    pub extend_s: f64,
    /// Retract phase.
    pub retract_s: f64,
    /// Brief stop between extend and retract.
    pub stop_gap_s: f64,
    /// Wait between cycles (startup value, adjustable at runtime).
    pub wait_s: f64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            initial_retract_s: DEFAULT_INITIAL_RETRACT_S,
            extend_s: DEFAULT_EXTEND_S,
            retract_s: DEFAULT_RETRACT_S,
            stop_gap_s: DEFAULT_STOP_GAP_S,
            wait_s: DEFAULT_WAIT_S,
        }
    }
}

impl CycleSettings {
    /// Validate that every duration is a positive, representable number of
    /// seconds no longer than `MAX_PHASE_SECS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("initial_retract_s", self.initial_retract_s),
            ("extend_s", self.extend_s),
            ("retract_s", self.retract_s),
            ("stop_gap_s", self.stop_gap_s),
            ("wait_s", self.wait_s),
        ] {
            Self::duration(name, value)?;
        }
        Ok(())
    }

    /// Convert a seconds value, rejecting anything that is not finite, rounds
    /// to zero, or exceeds `MAX_PHASE_SECS`.
    pub fn duration(name: &str, secs: f64) -> Result<Duration, ConfigError> {
        let invalid = || {
            ConfigError::ValidationError(format!(
                "cycle.{name} must be between 0 and {MAX_PHASE_SECS} seconds (exclusive of 0), got {secs}"
            ))
        };
        let duration = Duration::try_from_secs_f64(secs).map_err(|_| invalid())?;
        if duration.is_zero() || duration > Duration::from_secs(MAX_PHASE_SECS) {
            return Err(invalid());
        }
        Ok(duration)
    }
}

/// HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Socket address the API listens on.
    pub bind: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Complete daemon configuration (`relact.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelactConfig {
    /// Logging and identity.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Relay wiring.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Phase durations.
    #[serde(default)]
    pub cycle: CycleSettings,
    /// HTTP listener.
    #[serde(default)]
    pub api: ApiConfig,
}

impl RelactConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.relay.validate()?;
        self.cycle.validate()?;
        Ok(())
    }

    /// Load from `path`, falling back to defaults when the file is missing.
    ///
    /// Parse and validation errors are still returned.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let config = match Self::load(path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(ConfigError::FileNotFound) => {
                warn!("No config at {}; using built-in defaults", path.display());
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Any serde-deserializable struct can use ConfigLoader.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
