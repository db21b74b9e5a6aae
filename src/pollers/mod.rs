//! Data-source pollers — one per external source.
//!
//! Each poller owns the state fields of its source, resets them to their
//! sentinels at the start of a poll, and reports how the poll went as a
//! [`PollOutcome`].  No poller ever returns an error to its caller:
//! failures are contained here and become display content.

pub mod air_quality;
pub mod inside;
pub mod weather;

use core::fmt;

use serde_json::Value;

use crate::error::{FetchError, ParseError, SensorError};

pub use air_quality::AirQualityPoller;
pub use inside::InsidePoller;
pub use weather::WeatherPoller;

/// The three refreshable sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Weather,
    AirQuality,
    Inside,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Weather, Source::AirQuality, Source::Inside];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::AirQuality => "air-quality",
            Self::Inside => "inside",
        }
    }

    /// Network sources are skipped while disconnected.
    pub const fn needs_network(self) -> bool {
        !matches!(self, Self::Inside)
    }
}

/// How a single poll went.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Every field the source owns was refreshed.
    Updated,
    /// Parsing stopped at the given field; fields before it keep their
    /// new values, the rest stay at sentinel.
    ParseFailed(ParseError),
    /// The server answered with a non-200 status.
    HttpStatus(u16),
    /// The request never produced a response.
    Transport(FetchError),
    /// A well-formed answer that carried no data.
    NoData,
    /// The sensor is not fitted.
    SensorAbsent,
    SensorFailed(SensorError),
}

impl PollOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated)
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => write!(f, "updated"),
            Self::ParseFailed(e) => write!(f, "parse failed: {e}"),
            Self::HttpStatus(code) => write!(f, "HTTP {code}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::NoData => write!(f, "no data"),
            Self::SensorAbsent => write!(f, "sensor absent"),
            Self::SensorFailed(e) => write!(f, "sensor: {e}"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// JSON field access
// ───────────────────────────────────────────────────────────────

/// Object member; `path` names it in the error.
pub(crate) fn member<'a>(v: &'a Value, key: &str, path: &'static str) -> Result<&'a Value, ParseError> {
    match v {
        Value::Object(map) => map.get(key).ok_or(ParseError::Missing(path)),
        _ => Err(ParseError::WrongType(path)),
    }
}

/// Array element.
pub(crate) fn element<'a>(v: &'a Value, index: usize, path: &'static str) -> Result<&'a Value, ParseError> {
    match v {
        Value::Array(items) => items.get(index).ok_or(ParseError::Missing(path)),
        _ => Err(ParseError::WrongType(path)),
    }
}

pub(crate) fn number(v: &Value, path: &'static str) -> Result<f64, ParseError> {
    v.as_f64().ok_or(ParseError::WrongType(path))
}

/// Integer field; floats are truncated.
pub(crate) fn integer(v: &Value, path: &'static str) -> Result<i64, ParseError> {
    match v.as_i64() {
        Some(i) => Ok(i),
        None => number(v, path).map(|f| f as i64),
    }
}

pub(crate) fn text<'a>(v: &'a Value, path: &'static str) -> Result<&'a str, ParseError> {
    v.as_str().ok_or(ParseError::WrongType(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn member_distinguishes_missing_and_wrong_type() {
        let v = json!({"a": 1});
        assert_eq!(member(&v, "a", "a"), Ok(&json!(1)));
        assert_eq!(member(&v, "b", "b"), Err(ParseError::Missing("b")));
        assert_eq!(member(&json!([1]), "a", "a"), Err(ParseError::WrongType("a")));
    }

    #[test]
    fn integer_accepts_floats() {
        assert_eq!(integer(&json!(12), "x"), Ok(12));
        assert_eq!(integer(&json!(12.9), "x"), Ok(12));
        assert_eq!(integer(&json!("12"), "x"), Err(ParseError::WrongType("x")));
    }

    #[test]
    fn only_network_sources_need_network() {
        assert!(Source::Weather.needs_network());
        assert!(Source::AirQuality.needs_network());
        assert!(!Source::Inside.needs_network());
    }
}
