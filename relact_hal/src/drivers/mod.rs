//! Line driver implementations.
//!
//! - [`simulation`] - In-memory lines for development and testing
//! - `rpi_gpio` - Raspberry Pi GPIO via rppal (`rpi` feature)
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `LineDriver` trait from `relact_common::relay::driver`
//! 3. Register the driver in `register_all_drivers()`

#[cfg(feature = "rpi")]
pub mod rpi_gpio;
pub mod simulation;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("simulation", simulation::create_driver);

    #[cfg(feature = "rpi")]
    registry.register("rppal", rpi_gpio::create_driver);
}
