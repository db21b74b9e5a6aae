//! Panel backlight on one PWM channel.

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::DisplayError;

pub struct Backlight<P> {
    pwm: P,
    percent: u8,
}

impl<P: SetDutyCycle> Backlight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, percent: 100 }
    }

    /// `level` 0.0–1.0, clamped.
    pub fn set_level(&mut self, level: f32) -> Result<(), DisplayError> {
        let percent = (level.clamp(0.0, 1.0) * 100.0).round() as u8;
        if percent == self.percent {
            return Ok(());
        }
        self.pwm
            .set_duty_cycle_percent(percent)
            .map_err(|_| DisplayError::BacklightFailed)?;
        debug!("Backlight: {}% -> {}%", self.percent, percent);
        self.percent = percent;
        Ok(())
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}
