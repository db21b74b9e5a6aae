//! RGB status LED driver.
//!
//! Three PWM channels drive discrete R/G/B LEDs (or a common-cathode
//! RGB LED).  Generic over `embedded-hal` 1.0 `SetDutyCycle`, so the
//! same driver runs on LEDC channels on the device and on recording
//! channels in host tests.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::DisplayError;
use crate::palette::{Rgb, WarningLevel};

pub struct StatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    current: Rgb,
}

impl<R, G, B> StatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self {
            red,
            green,
            blue,
            current: Rgb::default(),
        }
    }

    pub fn set_colour(&mut self, colour: Rgb) -> Result<(), DisplayError> {
        let Rgb(r, g, b) = colour;
        self.red
            .set_duty_cycle_fraction(u16::from(r), 255)
            .map_err(|_| DisplayError::IndicatorFailed)?;
        self.green
            .set_duty_cycle_fraction(u16::from(g), 255)
            .map_err(|_| DisplayError::IndicatorFailed)?;
        self.blue
            .set_duty_cycle_fraction(u16::from(b), 255)
            .map_err(|_| DisplayError::IndicatorFailed)?;
        self.current = colour;
        Ok(())
    }

    pub fn show(&mut self, level: WarningLevel) -> Result<(), DisplayError> {
        self.set_colour(level.rgb())
    }

    pub fn off(&mut self) -> Result<(), DisplayError> {
        self.set_colour(Rgb::default())
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }
}

#[cfg(test)]
pub(crate) mod test_pwm {
    use core::convert::Infallible;
    use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};

    /// PWM channel that just remembers its duty.
    #[derive(Debug, Default)]
    pub struct RecordingPwm {
        pub duty: u16,
    }

    impl ErrorType for RecordingPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for RecordingPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[derive(Debug)]
    pub struct BrokenPwm;

    #[derive(Debug)]
    pub struct PwmFault;

    impl embedded_hal::pwm::Error for PwmFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for BrokenPwm {
        type Error = PwmFault;
    }

    impl SetDutyCycle for BrokenPwm {
        fn max_duty_cycle(&self) -> u16 {
            255
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), PwmFault> {
            Err(PwmFault)
        }
    }
}
