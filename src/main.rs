//! Weatherdash Firmware — Main Entry Point
//!
//! Wires ESP-IDF peripherals into the adapters and hands the board to
//! the supervisor, which never returns.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  WifiAdapter      EspHttpAdapter   HardwareAdapter             │
//! │  (Connectivity)   (HttpPort)       (SCD-30 · light · LED)      │
//! │  LogDisplay       SystemClock      LogEventSink                │
//! │  (DisplayPort)    (Clock + TWDT)   (EventSink)                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  Supervisor ─▶ DashboardService (pure logic)           │    │
//! │  │  Scheduler · Pollers · Derive · Layout                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pin map (ESP32-S3 feather-style board):
//!
//! | Signal        | GPIO |
//! |---------------|------|
//! | I2C SDA       | 3    |
//! | I2C SCL       | 4    |
//! | Light (ADC1)  | 1    |
//! | LED R / G / B | 38 / 39 / 40 |
//! | Backlight PWM | 14   |
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::Delay;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, config::TimerConfig};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{info, warn};

use weatherdash::adapters::display::LogDisplay;
use weatherdash::adapters::hardware::{Board, HardwareAdapter};
use weatherdash::adapters::http::EspHttpAdapter;
use weatherdash::adapters::log_sink::LogEventSink;
use weatherdash::adapters::time::SystemClock;
use weatherdash::adapters::wifi::WifiAdapter;
use weatherdash::app::supervisor::Supervisor;
use weatherdash::config::DashboardConfig;
use weatherdash::drivers::backlight::Backlight;
use weatherdash::drivers::status_led::StatusLed;
use weatherdash::drivers::watchdog::Watchdog;
use weatherdash::error::{Error, SensorError};
use weatherdash::sensors::{AmbientLightSensor, Scd30};

/// Secrets and location come from the build environment.
fn build_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    let env = [
        (option_env!("WIFI_SSID"), &mut config.wifi_ssid),
        (option_env!("WIFI_PASS"), &mut config.wifi_password),
        (option_env!("OWM_API_KEY"), &mut config.api_key),
        (option_env!("LATITUDE"), &mut config.latitude),
        (option_env!("LONGITUDE"), &mut config.longitude),
    ];
    for (value, field) in env {
        if let Some(v) = value {
            *field = v.to_owned();
        }
    }
    config
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Weatherdash v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = build_config();
    config.validate().map_err(Error::from)?;
    if config.api_key.is_empty() {
        warn!("No OWM_API_KEY at build time; API polls will fail with 401");
    }

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 3. Network ────────────────────────────────────────────
    let esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?;
    let mut wifi = WifiAdapter::new(BlockingWifi::wrap(esp_wifi, sysloop)?);
    if let Err(e) = wifi.set_credentials(&config.wifi_ssid, &config.wifi_password) {
        warn!("WiFi: {} — running offline", e);
    }

    // ── 4. Sensors ────────────────────────────────────────────
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio3,
        peripherals.pins.gpio4,
        &I2cConfig::new().baudrate(Hertz(50_000)),
    )?;
    let scd30 = Scd30::new(i2c, Delay::new_default());

    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let adc_config = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut light_channel = AdcChannelDriver::new(&adc1, peripherals.pins.gpio1, &adc_config)?;
    let light = AmbientLightSensor::new(|| {
        adc1.read(&mut light_channel)
            .map_err(|_| SensorError::BusError)
    });

    // ── 5. LED + backlight PWM ────────────────────────────────
    let timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default().frequency(Hertz(5_000)),
    )?;
    let red = LedcDriver::new(peripherals.ledc.channel0, &timer, peripherals.pins.gpio38)?;
    let green = LedcDriver::new(peripherals.ledc.channel1, &timer, peripherals.pins.gpio39)?;
    let blue = LedcDriver::new(peripherals.ledc.channel2, &timer, peripherals.pins.gpio40)?;
    let backlight = LedcDriver::new(peripherals.ledc.channel3, &timer, peripherals.pins.gpio14)?;

    // ── 6. Board + supervisor ─────────────────────────────────
    let mut board = Board {
        net: wifi,
        http: EspHttpAdapter::new(),
        hardware: HardwareAdapter::new(scd30, light, StatusLed::new(red, green, blue)),
        display: LogDisplay::new(Backlight::new(backlight)),
        clock: SystemClock::new(Watchdog::new()),
    };
    let mut sink = LogEventSink::new();

    info!("System ready. Entering main loop.");
    Supervisor::new(config).run_forever(&mut board, &mut sink)
}
