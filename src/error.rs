//! Unified error types for the dashboard firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! supervisor's error handling uniform.  Per-source errors ([`FetchError`],
//! [`ParseError`], [`SensorError`]) normally stay inside their poller and
//! surface as a [`PollOutcome`](crate::pollers::PollOutcome); only display,
//! indicator, and clock failures escape a cycle.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An HTTP fetch could not complete.
    Fetch(FetchError),
    /// An API body was missing a field or had the wrong type.
    Parse(ParseError),
    /// The climate sensor could not be read.
    Sensor(SensorError),
    /// The display or backlight rejected a command.
    Display(DisplayError),
    /// Corrected time could not be turned into a calendar date.
    Clock(ClockError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Clock(e) => write!(f, "clock: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

/// Transport-level failures reported by an [`HttpPort`](crate::app::ports::HttpPort).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be opened (DNS, socket, TLS).
    ConnectFailed,
    /// The request was sent but reading the response failed.
    ReadFailed,
    /// The transport has no route (e.g. host simulation without a canned reply).
    Unavailable,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::Unavailable => write!(f, "transport unavailable"),
        }
    }
}

impl From<FetchError> for Error {
    fn from(e: FetchError) -> Self {
        Self::Fetch(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// A required field was absent or not of the expected JSON type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Status looked fine but no JSON body came back.
    MissingBody,
    /// Field at the given path is absent.
    Missing(&'static str),
    /// Field at the given path has the wrong type.
    WrongType(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBody => write!(f, "response had no JSON body"),
            Self::Missing(path) => write!(f, "missing field `{path}`"),
            Self::WrongType(path) => write!(f, "field `{path}` has the wrong type"),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered on the bus.
    NotPresent,
    /// An I2C transaction failed.
    BusError,
    /// A data word failed its CRC check.
    CrcMismatch,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPresent => write!(f, "sensor not present"),
            Self::BusError => write!(f, "I2C bus error"),
            Self::CrcMismatch => write!(f, "CRC mismatch"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The panel did not accept the frame.
    DrawFailed,
    /// The backlight could not be set.
    BacklightFailed,
    /// The indicator LED could not be driven.
    IndicatorFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DrawFailed => write!(f, "draw failed"),
            Self::BacklightFailed => write!(f, "backlight failed"),
            Self::IndicatorFailed => write!(f, "indicator failed"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Clock errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// Corrected unix seconds fall outside the representable calendar range.
    OutOfRange(i64),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(secs) => write!(f, "timestamp {secs} out of range"),
        }
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Self::Clock(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config document could not be deserialised.
    Malformed,
    /// A config field failed range validation.
    /// The `&'static str` names the field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(field) => write!(f, "validation failed: {field}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
