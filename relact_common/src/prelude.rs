//! Prelude module for common re-exports.
//!
//! ```rust
//! use relact_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ApiConfig, ConfigError, ConfigLoader, CycleSettings, LogLevel, RelactConfig, RelayConfig,
    SharedConfig,
};

// ─── Relay ──────────────────────────────────────────────────────────
pub use crate::relay::{
    Channel, ChannelPattern, DriverFactory, Level, LineDriver, Polarity, RelayError,
};

// ─── Constants ──────────────────────────────────────────────────────
pub use crate::consts::{CHANNEL_COUNT, SERVICE_NAME};
