//! Log-backed display adapter.
//!
//! Implements [`DisplayPort`] for boards where the panel itself is
//! driven elsewhere: every label whose text or colour changed since the
//! previous frame is written to the log, and the backlight is a real
//! PWM channel.  The last frame is kept for inspection.

use embedded_hal::pwm::SetDutyCycle;
use log::info;

use crate::app::ports::DisplayPort;
use crate::drivers::backlight::Backlight;
use crate::error::DisplayError;
use crate::layout::Frame;

pub struct LogDisplay<P> {
    backlight: Backlight<P>,
    last: Option<Frame>,
    frames: u64,
}

impl<P: SetDutyCycle> LogDisplay<P> {
    pub fn new(backlight: Backlight<P>) -> Self {
        Self {
            backlight,
            last: None,
            frames: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn backlight_percent(&self) -> u8 {
        self.backlight.percent()
    }
}

impl<P: SetDutyCycle> DisplayPort for LogDisplay<P> {
    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError> {
        self.backlight.set_level(level)
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        for label in &frame.labels {
            let unchanged = self
                .last
                .as_ref()
                .and_then(|f| f.label(label.field))
                .is_some_and(|old| old.text == label.text && old.color == label.color);
            if !unchanged {
                info!(
                    "DRAW  | {:?} @ {:?} | '{}' rgb{:?}",
                    label.field, label.position, label.text, label.color
                );
            }
        }
        self.frames += 1;
        self.last = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::status_led::test_pwm::RecordingPwm;
    use crate::layout::{self, Field};
    use crate::state::DashboardState;

    #[test]
    fn keeps_last_frame_and_backlight() {
        let mut display = LogDisplay::new(Backlight::new(RecordingPwm::default()));
        let mut state = DashboardState::new();
        display.render(&layout::compose(&state)).unwrap();
        state.weather.temperature_f = Some(68);
        display.render(&layout::compose(&state)).unwrap();
        display.set_brightness(0.89).unwrap();

        assert_eq!(display.frames_rendered(), 2);
        assert_eq!(display.last_frame().map(|f| f.text(Field::Temperature)), Some("68"));
        assert_eq!(display.backlight_percent(), 89);
    }
}
