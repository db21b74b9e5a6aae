//! Mock board for integration tests.
//!
//! Wraps the host-side HTTP and WiFi simulations from the library and
//! adds a scripted climate sensor, a manual clock, and a display/LED that
//! record everything they are asked to do.

use std::collections::VecDeque;

use serde_json::json;
use weatherdash::adapters::http::{CannedReply, SimulatedHttp};
use weatherdash::adapters::wifi::WifiAdapter;
use weatherdash::app::events::AppEvent;
use weatherdash::app::ports::{
    AmbientLightPort, ClimateReading, ClimateSensorPort, ClockPort, ConnectivityError,
    ConnectivityPort, DisplayPort, EventSink, HttpPort, HttpResponse, IndicatorPort,
};
use weatherdash::config::DashboardConfig;
use weatherdash::error::{DisplayError, FetchError, SensorError};
use weatherdash::layout::{Field, Frame};
use weatherdash::palette::WarningLevel;

/// Device clock at power-on.
pub const BOOT: i64 = 1_000;
/// `current.dt` in the canned weather body: 2023-11-14 22:13:20 UTC.
pub const API_NOW: i64 = 1_700_000_000;
/// One hour west of UTC.
pub const TZ_OFFSET: i64 = -3_600;

pub const READING: ClimateReading = ClimateReading {
    co2_ppm: 612.4,
    humidity_pct: 44.6,
    temp_c: 22.8,
};

// ── Canned API bodies ─────────────────────────────────────────

/// A complete One Call body: 72F, 50%, 1013mb, UV 3.2, North wind at 11mph.
pub fn weather_body() -> serde_json::Value {
    json!({
        "timezone_offset": TZ_OFFSET,
        "current": {
            "dt": API_NOW,
            "sunrise": API_NOW + 3 * 3_600,
            "sunset": API_NOW + 8 * 3_600,
            "temp": 295.15,
            "pressure": 1013,
            "humidity": 50,
            "uvi": 3.2,
            "wind_speed": 5.0,
            "wind_deg": 10,
            "weather": [{ "description": "LIGHT rain" }]
        },
        "daily": [{ "moon_phase": 0.1 }]
    })
}

pub fn air_quality_body(index: u8) -> serde_json::Value {
    json!({ "list": [{ "main": { "aqi": index } }] })
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub config: DashboardConfig,
    pub http: SimulatedHttp,
    pub wifi: WifiAdapter,
    /// Served front to back; the last entry repeats once the queue is down to one.
    pub climate: VecDeque<Result<Option<ClimateReading>, SensorError>>,
    pub ambient: u16,
    pub now: i64,
    pub sleeps: Vec<u32>,
    pub frames: Vec<Frame>,
    pub brightness: Vec<f32>,
    pub indicator: Vec<WarningLevel>,
    /// Number of upcoming renders that fail.
    pub failing_renders: u32,
}

#[allow(dead_code)]
impl MockBoard {
    /// Connected board with healthy APIs and a fitted sensor.
    pub fn new() -> Self {
        let config = DashboardConfig {
            wifi_ssid: String::from("HomeNet"),
            wifi_password: String::from("hunter2hunter2"),
            api_key: String::from("k"),
            ..DashboardConfig::default()
        };
        let mut wifi = WifiAdapter::new();
        wifi.set_credentials(&config.wifi_ssid, &config.wifi_password)
            .expect("valid credentials");

        let mut board = Self {
            http: SimulatedHttp::new(),
            wifi,
            climate: VecDeque::from([Ok(Some(READING))]),
            ambient: 500,
            now: BOOT,
            sleeps: Vec::new(),
            frames: Vec::new(),
            brightness: Vec::new(),
            indicator: Vec::new(),
            failing_renders: 0,
            config,
        };
        board.set_weather(CannedReply::Body(200, weather_body().to_string()));
        board.set_air_quality(CannedReply::Body(200, air_quality_body(2).to_string()));
        board
    }

    pub fn set_weather(&mut self, reply: CannedReply) {
        let url = self.config.weather_url();
        self.http.set_reply(url, reply);
    }

    pub fn set_air_quality(&mut self, reply: CannedReply) {
        let url = self.config.air_quality_url();
        self.http.set_reply(url, reply);
    }

    pub fn weather_requests(&self) -> usize {
        self.http.request_count(&self.config.weather_url())
    }

    pub fn air_quality_requests(&self) -> usize {
        self.http.request_count(&self.config.air_quality_url())
    }

    pub fn last_frame(&self) -> &Frame {
        self.frames.last().expect("at least one frame rendered")
    }

    pub fn text(&self, field: Field) -> &str {
        self.last_frame().text(field)
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPort for MockBoard {
    fn get_json(&mut self, url: &str) -> Result<HttpResponse, FetchError> {
        self.http.get_json(url)
    }
}

impl ConnectivityPort for MockBoard {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        self.wifi.connect()
    }

    fn is_connected(&self) -> bool {
        self.wifi.is_connected()
    }
}

impl ClimateSensorPort for MockBoard {
    fn read_climate(&mut self) -> Result<Option<ClimateReading>, SensorError> {
        if self.climate.len() > 1 {
            return self.climate.pop_front().unwrap_or(Ok(None));
        }
        self.climate.front().copied().unwrap_or(Ok(None))
    }
}

impl AmbientLightPort for MockBoard {
    fn read_ambient(&mut self) -> u16 {
        self.ambient
    }
}

impl DisplayPort for MockBoard {
    fn set_brightness(&mut self, level: f32) -> Result<(), DisplayError> {
        self.brightness.push(level);
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if self.failing_renders > 0 {
            self.failing_renders -= 1;
            return Err(DisplayError::DrawFailed);
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}

impl IndicatorPort for MockBoard {
    fn set_indicator(&mut self, level: WarningLevel) -> Result<(), DisplayError> {
        self.indicator.push(level);
        Ok(())
    }
}

impl ClockPort for MockBoard {
    fn now_secs(&self) -> i64 {
        self.now
    }

    fn sleep_secs(&mut self, secs: u32) {
        self.sleeps.push(secs);
        self.now += i64::from(secs);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Keeps every event for later inspection.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
