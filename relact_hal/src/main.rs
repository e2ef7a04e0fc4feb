//! # relact_pin
//!
//! Stateless one-shot GPIO control: drive one pin on or off and exit.
//!
//! # Usage
//!
//! ```bash
//! # Turn GPIO 18 ON (HIGH)
//! relact_pin 18 on
//!
//! # Low-level trigger relay: ON drives the line LOW
//! relact_pin 23 on --low-level
//!
//! # Set and hand the line back afterwards
//! relact_pin 23 off --low-level --cleanup
//! ```
//!
//! Builds without the `rpi` feature default to the simulation driver and
//! warn that no line was changed.

use clap::{Parser, ValueEnum};
use relact_common::relay::Polarity;
use relact_hal::driver_registry::DriverRegistry;
use relact_hal::toggle::{
    DEFAULT_PIN_DRIVER, PinRequest, is_common_gpio, set_pin, touches_hardware,
};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Desired logical pin state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PinStatus {
    /// Activate the device.
    On,
    /// Deactivate the device.
    Off,
}

/// relact_pin - set a GPIO pin on or off
#[derive(Parser, Debug)]
#[command(name = "relact_pin")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Set a GPIO pin on or off (one-shot)")]
#[command(long_about = None)]
struct Args {
    /// GPIO pin number (BCM numbering, e.g. 18, 23)
    pin: u8,

    /// Desired status
    #[arg(value_enum, ignore_case = true)]
    status: PinStatus,

    /// Use low-level trigger logic (LOW=ON, HIGH=OFF), as on opto-isolated relay modules
    #[arg(long)]
    low_level: bool,

    /// Release the line after setting it (default: leave the pin in its set state)
    #[arg(long)]
    cleanup: bool,

    /// Line driver to use
    #[arg(short, long, default_value = DEFAULT_PIN_DRIVER)]
    driver: String,

    /// Allow pins outside the common BCM range 2-27
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if !is_common_gpio(args.pin) {
        if !args.force {
            return Err(format!(
                "GPIO pin {} may not be valid (common BCM GPIO pins are 2-27); pass --force to continue",
                args.pin
            )
            .into());
        }
        warn!("GPIO pin {} is outside the common BCM range 2-27", args.pin);
    }

    let registry = DriverRegistry::builtin();
    let mut driver = registry.create_driver(&args.driver)?;

    let req = PinRequest {
        pin: args.pin,
        on: args.status == PinStatus::On,
        polarity: Polarity::from_low_level_trigger(args.low_level),
        cleanup: args.cleanup,
    };
    set_pin(driver.as_mut(), &req)?;

    if !touches_hardware(driver.as_ref()) {
        warn!(
            "Driver '{}' is simulated; GPIO {} was not changed (build with --features rpi)",
            driver.name(),
            args.pin
        );
        return Ok(());
    }
    if !args.cleanup {
        info!(
            "GPIO {} is now set. Use --cleanup to reset the line.",
            args.pin
        );
    }
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
