//! Air-quality poller.  The response is a list that should hold exactly
//! one entry; an empty list means the service has no data for the spot.

use log::{info, warn};
use serde_json::Value;

use super::{PollOutcome, element, integer, member};
use crate::app::ports::HttpPort;
use crate::error::ParseError;
use crate::state::{AirQualityState, DashboardState};

pub struct AirQualityPoller {
    url: String,
}

impl AirQualityPoller {
    pub fn new(url: String) -> Self {
        Self { url }
    }

    pub fn poll(&self, http: &mut impl HttpPort, state: &mut DashboardState) -> PollOutcome {
        info!("AirQuality: fetching");
        state.air_quality = AirQualityState::default();

        let response = match http.get_json(&self.url) {
            Ok(r) => r,
            Err(e) => {
                warn!("AirQuality: transport failed — {}", e);
                return PollOutcome::Transport(e);
            }
        };

        state.air_quality.http_status = response.status;
        if response.status != 200 {
            warn!("AirQuality: HTTP {}", response.status);
            return PollOutcome::HttpStatus(response.status);
        }

        let Some(body) = response.body else {
            return PollOutcome::ParseFailed(ParseError::MissingBody);
        };

        match parse_index(&body) {
            Ok(Some(index)) => {
                state.air_quality.index = index;
                info!("AirQuality: index {}", index);
                PollOutcome::Updated
            }
            Ok(None) => {
                info!("AirQuality: empty list");
                PollOutcome::NoData
            }
            Err(e) => {
                warn!("AirQuality: parse failed — {}", e);
                PollOutcome::ParseFailed(e)
            }
        }
    }
}

/// `Ok(None)` for an empty list.
fn parse_index(body: &Value) -> Result<Option<u8>, ParseError> {
    let list = member(body, "list", "list")?;
    let items = list.as_array().ok_or(ParseError::WrongType("list"))?;
    if items.is_empty() {
        return Ok(None);
    }
    let main = member(element(list, 0, "list[0]")?, "main", "list[0].main")?;
    let aqi = integer(member(main, "aqi", "list[0].main.aqi")?, "list[0].main.aqi")?;
    match u8::try_from(aqi) {
        Ok(index @ 1..=5) => Ok(Some(index)),
        _ => Err(ParseError::WrongType("list[0].main.aqi")),
    }
}
