//! Output drivers and peripheral helpers.

pub mod backlight;
pub mod status_led;
pub mod watchdog;
