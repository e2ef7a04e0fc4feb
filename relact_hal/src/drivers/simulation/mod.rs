//! Simulation driver module.
//!
//! Software lines for development and testing without a relay board. A
//! [`SimProbe`] handle observes line levels and injects write faults after
//! the driver has been boxed and handed to a `RelayBoard`.

mod driver;

pub use driver::{SimProbe, SimulationDriver};

use relact_common::relay::LineDriver;

/// Factory function to create a simulation driver instance.
pub fn create_driver() -> Box<dyn LineDriver> {
    Box::new(SimulationDriver::new())
}
