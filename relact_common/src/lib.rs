//! relact Common Library
//!
//! This crate provides the shared relay vocabulary, the line driver trait
//! and configuration loading utilities for all relact workspace crates.
//!
//! # Module Structure
//!
//! - [`relay`] - Channels, logic levels, polarity and the `LineDriver` trait
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide defaults (pins, durations, paths)
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use relact_common::prelude::*;
//!
//! let polarity = Polarity::from_low_level_trigger(true);
//! assert_eq!(polarity.level_for(true), Level::Low);
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
pub mod relay;
