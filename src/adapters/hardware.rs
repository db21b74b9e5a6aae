//! Hardware adapter — bridges on-board peripherals to domain port traits.
//!
//! Owns the climate sensor, the ambient light sensor and the status LED,
//! exposing them through [`ClimateSensorPort`], [`AmbientLightPort`] and
//! [`IndicatorPort`].  Together with the network and display adapters it
//! forms the [`Board`] handed to the supervisor.

use embedded_hal::pwm::SetDutyCycle;
use log::info;

use crate::app::ports::{
    AmbientLightPort, ClimateReading, ClimateSensorPort, ClockPort, ConnectivityError,
    ConnectivityPort, DisplayPort, HttpPort, HttpResponse, IndicatorPort,
};
use crate::drivers::status_led::StatusLed;
use crate::error::{DisplayError, FetchError, SensorError};
use crate::layout::Frame;
use crate::palette::WarningLevel;

/// Concrete adapter that combines the sensing and indicator hardware.
pub struct HardwareAdapter<S, L, R, G, B> {
    climate: S,
    light: L,
    led: StatusLed<R, G, B>,
    level: Option<WarningLevel>,
}

impl<S, L, R, G, B> HardwareAdapter<S, L, R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(climate: S, light: L, led: StatusLed<R, G, B>) -> Self {
        Self {
            climate,
            light,
            led,
            level: None,
        }
    }

    /// Level last shown on the LED.
    pub fn indicator(&self) -> Option<WarningLevel> {
        self.level
    }
}

// ── Sensing ───────────────────────────────────────────────────

impl<S: ClimateSensorPort, L, R, G, B> ClimateSensorPort for HardwareAdapter<S, L, R, G, B> {
    fn read_climate(&mut self) -> Result<Option<ClimateReading>, SensorError> {
        self.climate.read_climate()
    }
}

impl<S, L: AmbientLightPort, R, G, B> AmbientLightPort for HardwareAdapter<S, L, R, G, B> {
    fn read_ambient(&mut self) -> u16 {
        self.light.read_ambient()
    }
}

// ── Indicator ─────────────────────────────────────────────────

impl<S, L, R, G, B> IndicatorPort for HardwareAdapter<S, L, R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_indicator(&mut self, level: WarningLevel) -> Result<(), DisplayError> {
        if self.level == Some(level) {
            return Ok(());
        }
        self.led.show(level)?;
        info!("LED: {:?}", level);
        self.level = Some(level);
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Board
// ───────────────────────────────────────────────────────────────

/// Every adapter the dashboard needs, bundled so one `&mut` satisfies
/// [`DashboardIo`](crate::app::ports::DashboardIo).
pub struct Board<N, H, W, D, C> {
    pub net: N,
    pub http: H,
    pub hardware: W,
    pub display: D,
    pub clock: C,
}

impl<N: ConnectivityPort, H, W, D, C> ConnectivityPort for Board<N, H, W, D, C> {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        self.net.connect()
    }

    fn is_connected(&self) -> bool {
        self.net.is_connected()
    }
}

impl<N, H: HttpPort, W, D, C> HttpPort for Board<N, H, W, D, C> {
    fn get_json(&mut self, url: &str) -> Result<HttpResponse, FetchError> {
        self.http.get_json(url)
    }
}

impl<N, H, W: ClimateSensorPort, D, C> ClimateSensorPort for Board<N, H, W, D, C> {
    fn read_climate(&mut self) -> Result<Option<ClimateReading>, SensorError> {
        self.hardware.read_climate()
    }
}

impl<N, H, W: AmbientLightPort, D, C> AmbientLightPort for Board<N, H, W, D, C> {
    fn read_ambient(&mut self) -> u16 {
        self.hardware.read_ambient()
    }
}

impl<N, H, W: IndicatorPort, D, C> IndicatorPort for Board<N, H, W, D, C> {
    fn set_indicator(&mut self, level: WarningLevel) -> Result<(), DisplayError> {
        self.hardware.set_indicator(level)
    }
}

impl<N, H, W, D: DisplayPort, C> DisplayPort for Board<N, H, W, D, C> {
    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError> {
        self.display.set_brightness(level)
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.display.render(frame)
    }
}

impl<N, H, W, D, C: ClockPort> ClockPort for Board<N, H, W, D, C> {
    fn now_secs(&self) -> i64 {
        self.clock.now_secs()
    }

    fn sleep_secs(&mut self, secs: u32) {
        self.clock.sleep_secs(secs);
    }
}
