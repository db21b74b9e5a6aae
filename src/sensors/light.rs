//! Ambient light sensor (analog phototransistor on an ADC channel).
//!
//! The raw ADC value is only compared against the backlight threshold,
//! so no unit conversion happens here.  A failed conversion repeats the
//! last good reading; before the first good one the sensor reports
//! bright, which keeps the panel readable.
//!
//! ## Dual-target design
//!
//! The ADC read is injected as a closure: on ESP-IDF it wraps the
//! oneshot ADC channel built in `main`, on host tests it is scripted.

use log::warn;

use crate::app::ports::AmbientLightPort;
use crate::error::SensorError;

pub struct AmbientLightSensor<F> {
    read_raw: F,
    last_good: u16,
}

impl<F> AmbientLightSensor<F>
where
    F: FnMut() -> Result<u16, SensorError>,
{
    pub fn new(read_raw: F) -> Self {
        Self {
            read_raw,
            last_good: u16::MAX,
        }
    }
}

impl<F> AmbientLightPort for AmbientLightSensor<F>
where
    F: FnMut() -> Result<u16, SensorError>,
{
    fn read_ambient(&mut self) -> u16 {
        match (self.read_raw)() {
            Ok(raw) => {
                self.last_good = raw;
                raw
            }
            Err(e) => {
                warn!("Light: read failed — {}, reusing {}", e, self.last_good);
                self.last_good
            }
        }
    }
}
