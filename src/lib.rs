//! Weatherdash firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod derive;
pub mod error;
pub mod layout;
pub mod palette;
pub mod pollers;
pub mod scheduler;
pub mod state;
pub mod units;

// Adapters and drivers carry their own cfg gating; host builds get the
// simulation paths.
pub mod adapters;
pub mod drivers;
pub mod sensors;
