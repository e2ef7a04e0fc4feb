//! Driver registry for GPIO line drivers.
//!
//! Provides a `DriverRegistry` struct for registering and retrieving line
//! driver factories. This uses constructor-injection rather than global state.

use relact_common::relay::{DriverFactory, LineDriver, RelayError};
use std::collections::HashMap;

use crate::drivers::register_all_drivers;

/// Registry of available line drivers.
///
/// Constructed at startup, populated via `register()`, and queried once by
/// the binary that builds the relay board.
pub struct DriverRegistry {
    factories: HashMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry holding every driver compiled into this build.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        register_all_drivers(&mut registry);
        registry
    }

    /// Register a driver factory.
    ///
    /// # Panics
    /// Panics if a driver with the same name is already registered.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.contains_key(name) {
            panic!("Driver '{name}' is already registered");
        }
        self.factories.insert(name, factory);
    }

    /// Create a driver instance by name.
    ///
    /// # Errors
    /// Returns `RelayError::DriverNotFound`, naming the registered drivers,
    /// if no driver with the given name is registered.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn LineDriver>, RelayError> {
        let factory = self.factories.get(name).ok_or_else(|| {
            RelayError::DriverNotFound(format!(
                "{name} (available: {})",
                self.list_drivers().join(", ")
            ))
        })?;
        Ok(factory())
    }

    /// Registered driver names, sorted.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relact_common::relay::Level;

    struct TestDriver;

    impl LineDriver for TestDriver {
        fn name(&self) -> &'static str {
            "test"
        }

        fn version(&self) -> &'static str {
            "0.1.0"
        }

        fn claim(&mut self, _pin: u8, _initial: Level) -> Result<(), RelayError> {
            Ok(())
        }

        fn write(&mut self, _pin: u8, _level: Level) -> Result<(), RelayError> {
            Ok(())
        }

        fn release(&mut self, _pin: u8) -> Result<(), RelayError> {
            Ok(())
        }
    }

    fn create_test_driver() -> Box<dyn LineDriver> {
        Box::new(TestDriver)
    }

    #[test]
    fn registry_register_and_create() {
        let mut reg = DriverRegistry::new();
        reg.register("test_driver", create_test_driver);

        let driver = reg.create_driver("test_driver").expect("should create");
        assert_eq!(driver.name(), "test");
    }

    #[test]
    fn registry_driver_not_found() {
        let mut reg = DriverRegistry::new();
        reg.register("beta", create_test_driver);
        reg.register("alpha", create_test_driver);
        let Err(RelayError::DriverNotFound(msg)) = reg.create_driver("nonexistent") else {
            panic!("expected DriverNotFound");
        };
        assert_eq!(msg, "nonexistent (available: alpha, beta)");
    }

    #[test]
    fn registry_list_drivers() {
        let mut reg = DriverRegistry::new();
        reg.register("beta", create_test_driver);
        reg.register("alpha", create_test_driver);
        assert_eq!(reg.list_drivers(), vec!["alpha", "beta"]);
    }

    #[test]
    fn builtin_unknown_driver_lists_simulation() {
        let err = DriverRegistry::builtin().create_driver("gpiod").err().unwrap();
        assert!(err.to_string().contains("simulation"), "{err}");
    }

    #[test]
    fn builtin_registry_has_simulation() {
        let reg = DriverRegistry::builtin();
        let driver = reg.create_driver("simulation").expect("simulation is always built");
        assert_eq!(driver.name(), "simulation");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn registry_duplicate_panics() {
        let mut reg = DriverRegistry::new();
        reg.register("dup", create_test_driver);
        reg.register("dup", create_test_driver);
    }
}
