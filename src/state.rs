//! Shared dashboard state threaded through every stage of a cycle.
//!
//! `DashboardState` is the single record pollers write into and the
//! derived-state engine reads from.  It is created once per supervisor
//! run with every field at its sentinel, mutated in place each cycle, and
//! dropped only when the supervisor rebuilds it after a failed cycle.

use core::fmt::Write as _;

use crate::palette::{Tone, WarningLevel};
use crate::units::{Compass, UNKNOWN};

/// Short fixed-capacity text for day, hour and minute fields.
pub type ShortText = heapless::String<4>;

/// Format a short field; anything that does not fit becomes the placeholder.
pub fn short_text(args: core::fmt::Arguments<'_>) -> ShortText {
    let mut s = ShortText::new();
    if s.write_fmt(args).is_err() {
        s.clear();
        let _ = s.push_str(UNKNOWN);
    }
    s
}

// ---------------------------------------------------------------------------
// Weather (owned by the weather poller)
// ---------------------------------------------------------------------------

/// Outdoor conditions.  `None` is the "not known" sentinel for every field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    pub temperature_f: Option<i32>,
    pub humidity_pct: Option<i32>,
    pub pressure_mb: Option<i32>,
    pub uv_index: Option<f64>,
    pub conditions: Option<String>,
    pub wind_direction: Option<Compass>,
    /// Whole mph; 0 until known.
    pub wind_speed_mph: i32,
    /// Local-time epoch seconds (timezone offset already applied).
    pub sunrise_local: Option<i64>,
    pub sunset_local: Option<i64>,
    /// Lunar phase 0.0–1.0; 0.5 is full.
    pub moon_phase: Option<f64>,
    /// Event name of an alert in effect right now.
    pub alert: Option<String>,
    /// Last HTTP status; 0 means no response (never fetched or transport failure).
    pub http_status: u16,
}

impl WeatherState {
    /// Reset every owned field except the HTTP status.
    pub fn clear_readings(&mut self) {
        let status = self.http_status;
        *self = Self {
            http_status: status,
            ..Self::default()
        };
    }
}

// ---------------------------------------------------------------------------
// Air quality (owned by the air-quality poller)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AirQualityState {
    /// 1–5 scale; 0 means unknown.
    pub index: u8,
    pub http_status: u16,
}

// ---------------------------------------------------------------------------
// Indoor sensor (owned by the local sensor poller)
// ---------------------------------------------------------------------------

/// Indoor readings, rounded.  All zero means no reading / sensor absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsideState {
    pub co2_ppm: i32,
    pub humidity_pct: i32,
    pub temp_f: i32,
}

impl InsideState {
    pub fn has_reading(&self) -> bool {
        *self != Self::default()
    }
}

// ---------------------------------------------------------------------------
// Derived display fields (owned by the derived-state engine)
// ---------------------------------------------------------------------------

/// The single informational line chosen by priority each cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLine {
    pub text: String,
    pub tone: Tone,
}

impl Default for FlexLine {
    fn default() -> Self {
        Self {
            text: String::from(UNKNOWN),
            tone: Tone::Default,
        }
    }
}

/// Per-field colours picked from the threshold tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTones {
    pub temperature: Tone,
    pub humidity: Tone,
    pub uv: Tone,
    pub air_quality: Tone,
}

impl Default for FieldTones {
    fn default() -> Self {
        Self {
            temperature: Tone::Gray,
            humidity: Tone::Gray,
            uv: Tone::Default,
            air_quality: Tone::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFields {
    pub day_of_week: &'static str,
    pub month: &'static str,
    pub day_of_month: ShortText,
    pub hour: ShortText,
    /// Zero-padded to two digits once known.
    pub minute: ShortText,
    /// Numeric (month, day) of the corrected local date, once known.
    pub calendar_day: Option<(u8, u8)>,
    pub flex: FlexLine,
    pub tones: FieldTones,
    pub warning: WarningLevel,
    /// Backlight level 0.0–1.0 chosen from the ambient light reading.
    pub brightness: f32,
}

impl Default for DisplayFields {
    fn default() -> Self {
        Self {
            day_of_week: UNKNOWN,
            month: UNKNOWN,
            day_of_month: short_text(format_args!("{UNKNOWN}")),
            hour: short_text(format_args!("{UNKNOWN}")),
            minute: short_text(format_args!("{UNKNOWN}")),
            calendar_day: None,
            flex: FlexLine::default(),
            tones: FieldTones::default(),
            warning: WarningLevel::AllGood,
            brightness: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// DashboardState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Seconds added to the local clock to get authoritative local time.
    /// Set only by a successful weather fetch; never reset while running.
    pub clock_correction: Option<i64>,
    pub weather: WeatherState,
    pub air_quality: AirQualityState,
    pub inside: InsideState,
    pub display: DisplayFields,
    /// Network association as observed at the top of this cycle.
    pub connected: bool,
}

impl DashboardState {
    /// Fresh state with every field at its sentinel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Authoritative local time for a local clock reading, once known.
    pub fn corrected_now(&self, local_now: i64) -> Option<i64> {
        self.clock_correction.and_then(|c| local_now.checked_add(c))
    }
}
