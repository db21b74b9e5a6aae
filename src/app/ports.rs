//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DashboardService (domain)
//! ```
//!
//! Driven adapters (HTTP, WiFi, sensors, display, LED, clock, event sinks)
//! implement these traits.  The [`DashboardService`](super::service::DashboardService)
//! consumes them via generics, so the domain core never touches hardware
//! or sockets directly.

use serde_json::Value;

use crate::error::{DisplayError, FetchError, SensorError};
use crate::layout::Frame;
use crate::palette::WarningLevel;

// ───────────────────────────────────────────────────────────────
// Network ports
// ───────────────────────────────────────────────────────────────

/// What came back from one HTTP GET.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body.  `None` when the transport produced a status but
    /// no readable JSON.
    pub body: Option<Value>,
}

impl HttpResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn status_only(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Blocking "fetch JSON from URL" capability.  Timeouts are the
/// transport's business.
pub trait HttpPort {
    fn get_json(&mut self, url: &str) -> Result<HttpResponse, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
    AlreadyConnected,
}

impl core::fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no SSID configured"),
            Self::InvalidSsid => write!(f, "SSID must be 1-32 printable ASCII bytes"),
            Self::InvalidPassword => write!(f, "passphrase must be 8-64 bytes, or empty for an open network"),
            Self::ConnectionFailed => write!(f, "association failed"),
            Self::AlreadyConnected => write!(f, "already associated"),
        }
    }
}

/// Network association.
pub trait ConnectivityPort {
    /// One association attempt.
    fn connect(&mut self) -> Result<(), ConnectivityError>;
    fn is_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One raw indoor measurement, before calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub co2_ppm: f32,
    pub humidity_pct: f32,
    pub temp_c: f32,
}

/// CO2 / temperature / humidity sensor.
pub trait ClimateSensorPort {
    /// `Ok(None)` when the sensor has no new measurement ready.
    fn read_climate(&mut self) -> Result<Option<ClimateReading>, SensorError>;
}

/// Ambient light, lux-like raw units.
pub trait AmbientLightPort {
    fn read_ambient(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The panel.  Receives a fully composed frame; nothing flows back.
pub trait DisplayPort {
    /// Backlight level 0.0–1.0.
    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError>;
    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

/// Single RGB status LED.
pub trait IndicatorPort {
    fn set_indicator(&mut self, level: WarningLevel) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// The device's own clock.  May start anywhere; only differences and the
/// weather-derived correction give it meaning.
pub trait ClockPort {
    /// Local clock, whole seconds.
    fn now_secs(&self) -> i64;
    /// Block for `secs` seconds.
    fn sleep_secs(&mut self, secs: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Board bundle
// ───────────────────────────────────────────────────────────────

/// Everything one cycle touches.  A single `&mut impl DashboardIo`
/// avoids juggling several mutable borrows of the same board.
pub trait DashboardIo:
    HttpPort
    + ConnectivityPort
    + ClimateSensorPort
    + AmbientLightPort
    + DisplayPort
    + IndicatorPort
    + ClockPort
{
}

impl<T> DashboardIo for T where
    T: HttpPort
        + ConnectivityPort
        + ClimateSensorPort
        + AmbientLightPort
        + DisplayPort
        + IndicatorPort
        + ClockPort
{
}
