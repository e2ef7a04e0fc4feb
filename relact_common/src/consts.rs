//! System-wide constants for the relact workspace.
//!
//! Single source of truth for default pins, phase durations and paths.

/// Canonical service name (used for logging).
pub const SERVICE_NAME: &str = "relact";

/// Number of relay channels on the board.
pub const CHANNEL_COUNT: usize = 2;

/// Default BCM pin for relay channel 1.
pub const DEFAULT_CHANNEL_1_PIN: u8 = 18;

/// Default BCM pin for relay channel 2.
pub const DEFAULT_CHANNEL_2_PIN: u8 = 23;

/// Lowest BCM pin considered safe for general-purpose output.
pub const MIN_GPIO_PIN: u8 = 2;

/// Highest BCM pin on the 40-pin header.
pub const MAX_GPIO_PIN: u8 = 27;

/// Initial retract before the first cycle [s].
pub const DEFAULT_INITIAL_RETRACT_S: f64 = 5.0;

/// Extend phase [s].
pub const DEFAULT_EXTEND_S: f64 = 3.0;

/// Retract phase [s].
pub const DEFAULT_RETRACT_S: f64 = 3.0;

/// Brief stop between extend and retract [s].
pub const DEFAULT_STOP_GAP_S: f64 = 0.1;

/// Wait between cycles [s].
pub const DEFAULT_WAIT_S: f64 = 10.0;

/// Longest accepted phase or wait [s] (one week).
pub const MAX_PHASE_SECS: u64 = 7 * 24 * 60 * 60;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/relact/relact.toml";

/// Default line driver name.
pub const DEFAULT_DRIVER: &str = "simulation";
