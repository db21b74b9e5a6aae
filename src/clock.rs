//! Clock correction and calendar breakdown.
//!
//! The board has no RTC worth trusting.  Each successful weather fetch
//! carries the API's unix time and the location's UTC offset; the
//! difference between that and the local clock becomes an additive
//! correction applied to every later "now".

use jiff::Timestamp;
use jiff::tz::Offset;

use crate::error::ClockError;

const DAY_OF_WEEK: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_ABBR: [&str; 13] = [
    "--", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Offset that maps the local clock onto authoritative local time.
///
/// `correction = (api_unix_time + tz_offset) - local_clock`
///
/// `None` when the API time is not a representable calendar instant or
/// the arithmetic overflows.
pub fn correction(api_unix_time: i64, tz_offset_secs: i64, local_clock: i64) -> Option<i64> {
    let api_local = api_unix_time.checked_add(tz_offset_secs)?;
    CivilTime::from_local_secs(api_local).ok()?;
    api_local.checked_sub(local_clock)
}

/// Calendar fields of an already-corrected local timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    /// 0 = Monday.
    pub weekday: u8,
    /// 1–12.
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl CivilTime {
    /// Break down local epoch seconds.  The timezone offset is already
    /// folded into the correction, so the breakdown itself is at UTC.
    pub fn from_local_secs(local_secs: i64) -> Result<Self, ClockError> {
        let ts = Timestamp::from_second(local_secs).map_err(|_| ClockError::OutOfRange(local_secs))?;
        let dt = Offset::UTC.to_datetime(ts);
        Ok(Self {
            weekday: dt.weekday().to_monday_zero_offset() as u8,
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
        })
    }

    pub fn weekday_name(&self) -> &'static str {
        DAY_OF_WEEK.get(self.weekday as usize).copied().unwrap_or("--")
    }

    pub fn month_name(&self) -> &'static str {
        match self.month {
            1..=12 => MONTH_ABBR[self.month as usize],
            _ => "--",
        }
    }
}
