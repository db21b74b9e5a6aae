//! Sensor drivers.
//!
//! Each driver implements one sensing port directly, so the hardware
//! adapter only has to hold them and forward calls.

pub mod light;
pub mod scd30;

pub use light::AmbientLightSensor;
pub use scd30::Scd30;
