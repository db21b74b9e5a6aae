//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the dashboard: one
//! refresh-and-render cycle, the outer restart supervisor, and the events
//! both emit.  All interaction with hardware and the network happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
pub mod supervisor;
