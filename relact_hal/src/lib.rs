//! # relact HAL Library
//!
//! Relay board abstraction with a pluggable GPIO line driver.
//!
//! Drivers implement the `LineDriver` trait defined in
//! `relact_common::relay::driver`; the [`RelayBoard`] layers channel
//! numbering and trigger polarity on top of one driver.
//!
//! # Module Structure
//!
//! - [`board`] - `RelayBoard`, logical channel → physical line mapping
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Line driver implementations
//! - [`toggle`] - One-shot pin set used by the `relact_pin` binary
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     relact_hal                               │
//! │  ┌──────────────┐    ┌──────────────┐    ┌────────────────┐  │
//! │  │  RelayBoard  │───►│  LineDriver  │◄───│ DriverRegistry │  │
//! │  │ (ch → pin,   │    │ (trait obj)  │    │                │  │
//! │  │  polarity)   │    └──────────────┘    └────────────────┘  │
//! │  └──────────────┘     simulation | rppal                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod board;
pub mod driver_registry;
pub mod drivers;
pub mod toggle;

// Re-export key types for convenience
pub use crate::board::RelayBoard;
pub use crate::driver_registry::DriverRegistry;
