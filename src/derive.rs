//! Derived-state engine.
//!
//! Runs every cycle regardless of which pollers fired and turns raw
//! source state into presentation state: calendar strings, the flex line,
//! per-field colours, the status LED level, and backlight brightness.

use log::debug;

use crate::clock::CivilTime;
use crate::config::{DashboardConfig, SpecialDate};
use crate::error::ClockError;
use crate::palette::{Tone, WarningLevel};
use crate::state::{DashboardState, DisplayFields, FieldTones, FlexLine, short_text};
use crate::units::{self, UNKNOWN};

pub const NO_CONNECTION: &str = "NO INTERNET CONNECTION";
pub const FULL_MOON: &str = "Look for full moon";

/// Moon phase band treated as "full", inclusive.
const FULL_MOON_BAND: (f64, f64) = (0.48, 0.52);
/// Below this wind speed (mph) the flex line just says calm.
const CALM_MPH: i32 = 3;
/// Sunrise/sunset countdown horizon, minutes (exclusive).
const COUNTDOWN_MINUTES: i64 = 60;

pub struct DeriveEngine {
    special_dates: Vec<SpecialDate>,
    backlight_threshold: u16,
    backlight_dim: f32,
    backlight_bright: f32,
}

impl DeriveEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            special_dates: config.special_dates.clone(),
            backlight_threshold: config.backlight_threshold,
            backlight_dim: config.backlight_dim,
            backlight_bright: config.backlight_bright,
        }
    }

    /// Recompute every derived field from current state.
    pub fn run(&self, state: &mut DashboardState, local_now: i64, ambient: u16) -> Result<(), ClockError> {
        wrangle_time(state, local_now)?;
        let flex = self.select_flex(state, local_now);
        if flex != state.display.flex {
            debug!("Flex: '{}' ({:?})", flex.text, flex.tone);
        }
        state.display.flex = flex;
        state.display.tones = field_tones(state);
        state.display.warning = warning_level(state);
        state.display.brightness = self.brightness(ambient);
        Ok(())
    }

    /// First matching rule wins.
    pub fn select_flex(&self, state: &DashboardState, local_now: i64) -> FlexLine {
        let line = |text: String, tone: Tone| FlexLine { text, tone };
        let weather = &state.weather;

        if !state.connected {
            return line(String::from(NO_CONNECTION), Tone::VeryBad);
        }
        if let Some(alert) = &weather.alert {
            return line(alert.clone(), Tone::Bad);
        }
        if let Some(message) = self.special_message(state.display.calendar_day) {
            return line(message.to_owned(), Tone::Fair);
        }
        if weather.http_status != 200 {
            return line(format!("Weather API response: {}", weather.http_status), Tone::Moderate);
        }
        if state.air_quality.http_status != 200 {
            return line(
                format!("Air Quality API response: {}", state.air_quality.http_status),
                Tone::Moderate,
            );
        }

        let now = state.corrected_now(local_now);
        if let Some(mins) = minutes_until(weather.sunrise_local, now) {
            return line(format!("{mins} minutes to sunrise"), Tone::Moderate);
        }
        if let Some(mins) = minutes_until(weather.sunset_local, now) {
            return line(format!("{mins} minutes to sunset"), Tone::Moderate);
        }
        if weather
            .moon_phase
            .is_some_and(|p| (FULL_MOON_BAND.0..=FULL_MOON_BAND.1).contains(&p))
        {
            return line(String::from(FULL_MOON), Tone::Moderate);
        }

        let wind = if weather.wind_speed_mph < CALM_MPH {
            String::from("Winds calm")
        } else {
            let direction = weather.wind_direction.map_or(UNKNOWN, |c| c.name());
            format!("{} winds at {}mph", direction, weather.wind_speed_mph)
        };
        let pressure = weather
            .pressure_mb
            .map_or_else(|| String::from(UNKNOWN), |p| p.to_string());
        line(format!("{wind}, {pressure}mb"), Tone::Default)
    }

    fn special_message(&self, calendar_day: Option<(u8, u8)>) -> Option<&str> {
        let (month, day) = calendar_day?;
        self.special_dates
            .iter()
            .find(|d| d.month == month && d.day == day)
            .map(|d| d.message.as_str())
    }

    pub fn brightness(&self, ambient: u16) -> f32 {
        if ambient < self.backlight_threshold {
            self.backlight_dim
        } else {
            self.backlight_bright
        }
    }
}

/// Calendar strings from corrected time; placeholders until a correction exists.
pub fn wrangle_time(state: &mut DashboardState, local_now: i64) -> Result<(), ClockError> {
    let Some(now) = state.corrected_now(local_now) else {
        let keep = core::mem::take(&mut state.display);
        state.display = DisplayFields {
            flex: keep.flex,
            tones: keep.tones,
            warning: keep.warning,
            brightness: keep.brightness,
            ..DisplayFields::default()
        };
        return Ok(());
    };

    let t = CivilTime::from_local_secs(now)?;
    let d = &mut state.display;
    d.day_of_week = t.weekday_name();
    d.month = t.month_name();
    d.day_of_month = short_text(format_args!("{}", t.day));
    d.hour = short_text(format_args!("{}", t.hour));
    d.minute = short_text(format_args!("{:02}", t.minute));
    d.calendar_day = Some((t.month, t.day));
    Ok(())
}

/// Whole minutes until `event`, only inside the countdown horizon.
fn minutes_until(event: Option<i64>, now: Option<i64>) -> Option<i64> {
    let secs = event?.checked_sub(now?)?;
    let mins = (secs as f64 / 60.0).round() as i64;
    (mins > 0 && mins < COUNTDOWN_MINUTES).then_some(mins)
}

pub fn field_tones(state: &DashboardState) -> FieldTones {
    FieldTones {
        temperature: units::temperature_tone(state.weather.temperature_f),
        humidity: units::humidity_tone(state.weather.humidity_pct),
        uv: units::uv_tone(state.weather.uv_index),
        air_quality: units::aqi_tone(state.air_quality.index),
    }
}

/// Without a network any alert is stale, so connectivity wins.
pub fn warning_level(state: &DashboardState) -> WarningLevel {
    if !state.connected {
        WarningLevel::YellowAlert
    } else if state.weather.alert.is_some() {
        WarningLevel::RedAlert
    } else {
        WarningLevel::AllGood
    }
}
