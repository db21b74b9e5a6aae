//! Indoor CO2 / temperature / humidity poller.
//!
//! Works without a network.  Unlike the API pollers, any miss (no new
//! measurement, absent sensor, bus error) zeroes all three readings:
//! an unfitted sensor is a normal permanent state, not a glitch to ride out.

use log::{debug, warn};

use super::PollOutcome;
use crate::app::ports::ClimateSensorPort;
use crate::error::SensorError;
use crate::state::{DashboardState, InsideState};
use crate::units::celsius_to_fahrenheit;

pub struct InsidePoller {
    /// Added to the raw Celsius reading before conversion.
    calibration_c: f32,
}

impl InsidePoller {
    pub fn new(calibration_c: f32) -> Self {
        Self { calibration_c }
    }

    pub fn poll(&self, sensor: &mut impl ClimateSensorPort, state: &mut DashboardState) -> PollOutcome {
        state.inside = InsideState::default();

        match sensor.read_climate() {
            Ok(Some(reading)) => {
                let temp_c = f64::from(reading.temp_c + self.calibration_c);
                state.inside = InsideState {
                    co2_ppm: reading.co2_ppm.round() as i32,
                    humidity_pct: reading.humidity_pct.round() as i32,
                    temp_f: celsius_to_fahrenheit(temp_c).round() as i32,
                };
                debug!("Inside: {:?}", state.inside);
                PollOutcome::Updated
            }
            Ok(None) => {
                debug!("Inside: no measurement ready");
                PollOutcome::NoData
            }
            Err(SensorError::NotPresent) => PollOutcome::SensorAbsent,
            Err(e) => {
                warn!("Inside: read failed — {}", e);
                PollOutcome::SensorFailed(e)
            }
        }
    }
}
