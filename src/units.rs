//! Unit conversions and reading-to-presentation mappings.
//!
//! Every function here is total: unknown readings come in as `None` and
//! map to the neutral tone or the `"--"` placeholder.

use crate::palette::Tone;

/// Placeholder shown for any value that is not known yet.
pub const UNKNOWN: &str = "--";

const AIR_QUALITY: [&str; 6] = [
    UNKNOWN,
    "Good",
    "Moderate",
    "Unhealthy for sensitives",
    "Unhealthy",
    "Very Unhealthy",
];

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k * 9.0 / 5.0) - 459.67
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 1.8 + 32.0
}

/// Meters per second to whole miles per hour.
pub fn mps_to_mph(mps: f64) -> i32 {
    (mps * 2.237).round() as i32
}

// ---------------------------------------------------------------------------
// Compass
// ---------------------------------------------------------------------------

/// Eight-way wind direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl Compass {
    /// Bucket a bearing into 45° bands; North spans [337, 360) ∪ [0, 23).
    ///
    /// Negative bearings are not a direction and yield `None`; bearings
    /// of 360 and above wrap.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        if degrees < 0 {
            return None;
        }
        let bucket = match degrees % 360 {
            0..=22 => Self::North,
            23..=67 => Self::Northeast,
            68..=112 => Self::East,
            113..=157 => Self::Southeast,
            158..=202 => Self::South,
            203..=247 => Self::Southwest,
            248..=292 => Self::West,
            293..=336 => Self::Northwest,
            _ => Self::North,
        };
        Some(bucket)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::Northeast => "Northeast",
            Self::East => "East",
            Self::Southeast => "Southeast",
            Self::South => "South",
            Self::Southwest => "Southwest",
            Self::West => "West",
            Self::Northwest => "Northwest",
        }
    }
}

// ---------------------------------------------------------------------------
// Threshold bands
// ---------------------------------------------------------------------------

/// Outdoor temperature in whole °F.
pub fn temperature_tone(temp_f: Option<i32>) -> Tone {
    match temp_f {
        None => Tone::Default,
        Some(t) if t > 100 => Tone::Scorch,
        Some(t) if t > 89 => Tone::Hot,
        Some(t) if t > 74 => Tone::Warm,
        Some(t) if t > 49 => Tone::Mild,
        Some(t) if t > 32 => Tone::Cold,
        Some(_) => Tone::Freezing,
    }
}

/// Relative humidity in whole percent.
pub fn humidity_tone(humidity: Option<i32>) -> Tone {
    match humidity {
        None => Tone::Default,
        Some(h) if h < 30 => Tone::Good,
        Some(h) if h <= 80 => Tone::Fair,
        Some(h) if h <= 90 => Tone::Moderate,
        Some(_) => Tone::Bad,
    }
}

pub fn uv_label(uvi: Option<f64>) -> &'static str {
    match uvi {
        Some(u) if u > 10.0 => "Danger",
        Some(u) if u > 7.0 => "Very High",
        Some(u) if u > 5.0 => "High",
        Some(u) if u > 2.0 => "Medium",
        Some(u) if u.is_finite() => "Low",
        _ => UNKNOWN,
    }
}

pub fn uv_tone(uvi: Option<f64>) -> Tone {
    match uvi {
        Some(u) if u > 10.0 => Tone::VeryBad,
        Some(u) if u > 7.0 => Tone::Bad,
        Some(u) if u > 5.0 => Tone::Moderate,
        Some(u) if u > 2.0 => Tone::Fair,
        Some(u) if u.is_finite() => Tone::Good,
        _ => Tone::Default,
    }
}

/// Air-quality index 1–5; 0 means unknown.
pub fn aqi_label(aqi: u8) -> &'static str {
    AIR_QUALITY.get(aqi as usize).copied().unwrap_or(UNKNOWN)
}

pub fn aqi_tone(aqi: u8) -> Tone {
    match aqi {
        1 => Tone::Good,
        2 => Tone::Fair,
        3 => Tone::Moderate,
        4 => Tone::Bad,
        5 => Tone::VeryBad,
        _ => Tone::Default,
    }
}

/// Upper-case the first character and lower-case the rest.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
