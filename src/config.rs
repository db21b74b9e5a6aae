//! System configuration parameters
//!
//! All tunable parameters for the dashboard.  Secrets (WiFi, API key,
//! location) are resolved before the core starts; on device they come
//! from the build environment, on host from a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A calendar day that replaces the flex line with a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDate {
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    pub message: String,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    // --- Network ---
    pub wifi_ssid: String,
    pub wifi_password: String,

    // --- Weather API ---
    pub api_key: String,
    /// Decimal degrees, kept as text so the URL carries exactly what was configured.
    pub latitude: String,
    pub longitude: String,
    /// One Call endpoint (current + daily forecast + alerts).
    pub weather_base_url: String,
    /// Air pollution endpoint.
    pub air_quality_base_url: String,

    // --- Refresh cadence ---
    /// Weather refresh interval (seconds)
    pub weather_interval_secs: u32,
    /// Air-quality refresh interval (seconds)
    pub air_quality_interval_secs: u32,
    /// Indoor sensor read interval (seconds)
    pub sensor_interval_secs: u32,

    // --- Loop timing ---
    /// Idle sleep at the end of every cycle (seconds)
    pub cycle_sleep_secs: u32,
    /// Cooldown after a failed cycle before the loop restarts (seconds)
    pub failure_cooldown_secs: u32,

    // --- Sensor ---
    /// Added to the raw SCD-30 temperature before conversion (Celsius)
    pub temp_calibration_c: f32,

    // --- Presentation ---
    pub special_dates: Vec<SpecialDate>,
    /// Ambient light reading below which the dim backlight level is used
    pub backlight_threshold: u16,
    pub backlight_dim: f32,
    pub backlight_bright: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_password: String::new(),

            api_key: String::new(),
            latitude: String::from("0.0"),
            longitude: String::from("0.0"),
            weather_base_url: String::from("http://api.openweathermap.org/data/3.0/onecall"),
            air_quality_base_url: String::from(
                "http://api.openweathermap.org/data/2.5/air_pollution",
            ),

            // Prime intervals so refreshes rarely land on the same cycle.
            weather_interval_secs: 601,
            air_quality_interval_secs: 3_307,
            sensor_interval_secs: 47,

            cycle_sleep_secs: 10,
            failure_cooldown_secs: 20,

            temp_calibration_c: -0.8,

            special_dates: vec![SpecialDate {
                month: 5,
                day: 28,
                message: String::from("Happy birthday!!"),
            }],
            backlight_threshold: 1000,
            backlight_dim: 0.51,
            backlight_bright: 0.89,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config document and validate it.
    /// Missing fields fall back to their defaults.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(doc).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the scheduler or presentation layer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weather_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("weather_interval_secs"));
        }
        if self.air_quality_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("air_quality_interval_secs"));
        }
        if self.sensor_interval_secs == 0 {
            return Err(ConfigError::ValidationFailed("sensor_interval_secs"));
        }
        match self.latitude.trim().parse::<f64>() {
            Ok(lat) if (-90.0..=90.0).contains(&lat) => {}
            _ => return Err(ConfigError::ValidationFailed("latitude")),
        }
        match self.longitude.trim().parse::<f64>() {
            Ok(lon) if (-180.0..=180.0).contains(&lon) => {}
            _ => return Err(ConfigError::ValidationFailed("longitude")),
        }
        if !(0.0..=1.0).contains(&self.backlight_dim) {
            return Err(ConfigError::ValidationFailed("backlight_dim"));
        }
        if !(0.0..=1.0).contains(&self.backlight_bright) {
            return Err(ConfigError::ValidationFailed("backlight_bright"));
        }
        // 2000 is a leap year, so Feb 29 is allowed.
        for date in &self.special_dates {
            let (Ok(month), Ok(day)) = (i8::try_from(date.month), i8::try_from(date.day)) else {
                return Err(ConfigError::ValidationFailed("special_dates"));
            };
            if jiff::civil::Date::new(2000, month, day).is_err() {
                return Err(ConfigError::ValidationFailed("special_dates"));
            }
        }
        Ok(())
    }

    /// Current conditions, today's forecast and alerts in one request.
    pub fn weather_url(&self) -> String {
        format!(
            "{}?lat={}&lon={}&exclude=hourly,minutely&appid={}",
            self.weather_base_url, self.latitude, self.longitude, self.api_key
        )
    }

    pub fn air_quality_url(&self) -> String {
        format!(
            "{}?lat={}&lon={}&appid={}",
            self.air_quality_base_url, self.latitude, self.longitude, self.api_key
        )
    }
}
