//! Weather poller: current conditions, today's forecast, and alerts.
//!
//! Field names follow the One Call response verbatim.  Parsing runs in a
//! fixed order and stops at the first bad field; whatever was written
//! before that point stays.

use log::{debug, info, warn};
use serde_json::Value;

use super::{PollOutcome, element, integer, member, number, text};
use crate::app::ports::HttpPort;
use crate::clock;
use crate::error::ParseError;
use crate::state::DashboardState;
use crate::units::{Compass, kelvin_to_fahrenheit, mps_to_mph, sentence_case};

pub struct WeatherPoller {
    url: String,
}

impl WeatherPoller {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    /// Fetch and parse into `state`.  `local_now` is the device clock at
    /// fetch time, used to derive the clock correction.
    pub fn poll(&self, http: &mut impl HttpPort, local_now: i64, state: &mut DashboardState) -> PollOutcome {
        info!("Weather: fetching");

        // The clock correction survives failed polls.
        state.weather.clear_readings();
        state.weather.http_status = 0;

        let response = match http.get_json(&self.url) {
            Ok(r) => r,
            Err(e) => {
                warn!("Weather: transport failed — {}", e);
                return PollOutcome::Transport(e);
            }
        };

        state.weather.http_status = response.status;
        if response.status != 200 {
            warn!("Weather: HTTP {}", response.status);
            return PollOutcome::HttpStatus(response.status);
        }

        let Some(body) = response.body else {
            warn!("Weather: 200 without a JSON body");
            return PollOutcome::ParseFailed(ParseError::MissingBody);
        };

        match parse_into(&body, local_now, state) {
            Ok(()) => {
                info!(
                    "Weather: {:?}F {:?}% {:?}mb alert={:?}",
                    state.weather.temperature_f,
                    state.weather.humidity_pct,
                    state.weather.pressure_mb,
                    state.weather.alert
                );
                PollOutcome::Updated
            }
            Err(e) => {
                warn!("Weather: parse stopped — {}", e);
                PollOutcome::ParseFailed(e)
            }
        }
    }
}

fn parse_into(body: &Value, local_now: i64, state: &mut DashboardState) -> Result<(), ParseError> {
    let current = member(body, "current", "current")?;
    let daily = element(member(body, "daily", "daily")?, 0, "daily[0]")?;

    let api_now = integer(member(current, "dt", "current.dt")?, "current.dt")?;
    let tz_offset = integer(
        member(body, "timezone_offset", "timezone_offset")?,
        "timezone_offset",
    )?;
    let correction =
        clock::correction(api_now, tz_offset, local_now).ok_or(ParseError::WrongType("current.dt"))?;
    debug!("Weather: clock correction {}s", correction);
    state.clock_correction = Some(correction);

    let w = &mut state.weather;

    let kelvin = number(member(current, "temp", "current.temp")?, "current.temp")?;
    w.temperature_f = Some(kelvin_to_fahrenheit(kelvin).round() as i32);

    let humidity = number(member(current, "humidity", "current.humidity")?, "current.humidity")?;
    w.humidity_pct = Some(humidity.round() as i32);

    let pressure = number(member(current, "pressure", "current.pressure")?, "current.pressure")?;
    w.pressure_mb = Some(pressure.round() as i32);

    w.uv_index = Some(number(member(current, "uvi", "current.uvi")?, "current.uvi")?);

    let sunrise = integer(member(current, "sunrise", "current.sunrise")?, "current.sunrise")?;
    let sunset = integer(member(current, "sunset", "current.sunset")?, "current.sunset")?;
    w.sunrise_local = Some(
        sunrise
            .checked_add(tz_offset)
            .ok_or(ParseError::WrongType("current.sunrise"))?,
    );
    w.sunset_local = Some(
        sunset
            .checked_add(tz_offset)
            .ok_or(ParseError::WrongType("current.sunset"))?,
    );

    w.moon_phase = Some(number(
        member(daily, "moon_phase", "daily[0].moon_phase")?,
        "daily[0].moon_phase",
    )?);

    let weather = element(
        member(current, "weather", "current.weather")?,
        0,
        "current.weather[0]",
    )?;
    let description = text(
        member(weather, "description", "current.weather[0].description")?,
        "current.weather[0].description",
    )?;
    w.conditions = Some(sentence_case(description));

    let bearing = number(member(current, "wind_deg", "current.wind_deg")?, "current.wind_deg")?;
    w.wind_direction = Compass::from_degrees(bearing as i32);
    let speed = number(
        member(current, "wind_speed", "current.wind_speed")?,
        "current.wind_speed",
    )?;
    w.wind_speed_mph = mps_to_mph(speed);

    // Alerts are optional; an absent or empty list means none.
    let Some(alerts) = body.get("alerts") else {
        return Ok(());
    };
    if alerts.as_array().is_some_and(Vec::is_empty) {
        return Ok(());
    }
    let alert = element(alerts, 0, "alerts[0]")?;
    let event = text(member(alert, "event", "alerts[0].event")?, "alerts[0].event")?;
    let start = integer(member(alert, "start", "alerts[0].start")?, "alerts[0].start")?;
    let end = integer(member(alert, "end", "alerts[0].end")?, "alerts[0].end")?;

    // Only alerts in effect right now.
    if start < api_now && api_now < end {
        w.alert = Some(event.to_owned());
    } else {
        debug!("Weather: alert '{}' outside its window", event);
    }
    Ok(())
}
