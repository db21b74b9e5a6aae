//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                   |
//! |-------------|---------------------|-------------------------------|
//! | `display`   | DisplayPort         | Serial log + PWM backlight    |
//! | `hardware`  | ClimateSensorPort   | SCD-30 over I2C               |
//! |             | AmbientLightPort    | ADC phototransistor           |
//! |             | IndicatorPort       | RGB LED on three PWM channels |
//! | `http`      | HttpPort            | ESP-IDF HTTP client           |
//! | `log_sink`  | EventSink           | Serial log output             |
//! | `time`      | ClockPort           | ESP32 system timer + TWDT     |
//! | `wifi`      | ConnectivityPort    | ESP-IDF WiFi STA              |
//!
//! [`hardware::Board`] bundles one of each into a single `DashboardIo`.

pub mod display;
pub mod hardware;
pub mod http;
pub mod log_sink;
pub mod time;
pub mod wifi;
