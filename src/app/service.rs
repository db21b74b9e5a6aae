//! Dashboard service — the hexagonal core.
//!
//! [`DashboardService`] owns the configuration, the shared state record,
//! the three pollers and the refresh scheduler.  One call to
//! [`tick`](DashboardService::tick) is one cycle of the main loop.  All
//! I/O flows through port traits injected at call sites, making the
//! whole cycle testable with an in-memory board.
//!
//! ```text
//!  HttpPort ─────┐   ┌──────────────────────────┐
//!  Connectivity ─┼──▶│     DashboardService      │──▶ DisplayPort
//!  ClimateSensor ┤   │ Scheduler · Pollers ·     │──▶ IndicatorPort
//!  AmbientLight ─┘   │ Derive · Layout           │──▶ EventSink
//!                    └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::derive::DeriveEngine;
use crate::error::Result;
use crate::layout;
use crate::pollers::{AirQualityPoller, InsidePoller, PollOutcome, Source, WeatherPoller};
use crate::scheduler::RefreshScheduler;
use crate::state::DashboardState;

use super::events::{AppEvent, CycleReport};
use super::ports::{DashboardIo, EventSink};

// ───────────────────────────────────────────────────────────────
// DashboardService
// ───────────────────────────────────────────────────────────────

pub struct DashboardService {
    config: DashboardConfig,
    state: DashboardState,
    scheduler: RefreshScheduler,
    weather: WeatherPoller,
    air_quality: AirQualityPoller,
    inside: InsidePoller,
    derive: DeriveEngine,
    cycle_count: u64,
}

impl DashboardService {
    /// Build a service with every state field at its sentinel.
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            scheduler: RefreshScheduler::from_config(&config),
            weather: WeatherPoller::new(config.weather_url()),
            air_quality: AirQualityPoller::new(config.air_quality_url()),
            inside: InsidePoller::new(config.temp_calibration_c),
            derive: DeriveEngine::new(&config),
            state: DashboardState::new(),
            cycle_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!(
            "DashboardService started (weather {}s, air quality {}s, sensor {}s)",
            self.config.weather_interval_secs,
            self.config.air_quality_interval_secs,
            self.config.sensor_interval_secs
        );
        sink.emit(&AppEvent::Started);
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one cycle: connectivity → due pollers → derived state →
    /// backlight → render → indicator → sleep.
    ///
    /// Poller failures never surface here; an `Err` means the display,
    /// the indicator or the clock broke and the supervisor should restart.
    pub fn tick(&mut self, io: &mut impl DashboardIo, sink: &mut impl EventSink) -> Result<CycleReport> {
        self.cycle_count += 1;

        // 1. Connectivity
        let connected = self.ensure_connected(io);
        self.state.connected = connected;

        // 2. Due pollers
        let now = io.now_secs();
        let mut polled = heapless::Vec::new();
        for source in self.scheduler.take_due(now, connected) {
            let outcome = self.poll(source, io);
            sink.emit(&AppEvent::SourcePolled {
                source,
                outcome: outcome.clone(),
            });
            // At most one entry per source.
            let _ = polled.push((source, outcome));
        }

        // 3. Derived state
        let previous_flex = self.state.display.flex.text.clone();
        let ambient = io.read_ambient();
        self.derive.run(&mut self.state, io.now_secs(), ambient)?;
        if self.state.display.flex.text != previous_flex {
            sink.emit(&AppEvent::FlexChanged {
                text: self.state.display.flex.text.clone(),
            });
        }

        // 4. Present
        let display = &self.state.display;
        io.set_brightness(display.brightness)?;
        io.render(&layout::compose(&self.state))?;
        io.set_indicator(display.warning)?;

        let report = CycleReport {
            cycle: self.cycle_count,
            connected,
            polled,
            warning: display.warning,
            brightness: display.brightness,
        };
        debug!("Cycle {} done: {:?}", report.cycle, report.polled);
        sink.emit(&AppEvent::CycleCompleted(report.clone()));

        // 5. Idle
        io.sleep_secs(self.config.cycle_sleep_secs);
        Ok(report)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Cycles run since this service was built.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// One association attempt when down; a failure is logged and the
    /// cycle carries on offline.
    fn ensure_connected(&self, io: &mut impl DashboardIo) -> bool {
        if io.is_connected() {
            return true;
        }
        info!("WiFi: not connected, trying to associate");
        if let Err(e) = io.connect() {
            warn!("WiFi: connect failed — {}", e);
        }
        io.is_connected()
    }

    fn poll(&mut self, source: Source, io: &mut impl DashboardIo) -> PollOutcome {
        match source {
            Source::Weather => {
                let local_now = io.now_secs();
                self.weather.poll(io, local_now, &mut self.state)
            }
            Source::AirQuality => self.air_quality.poll(io, &mut self.state),
            Source::Inside => self.inside.poll(io, &mut self.state),
        }
    }
}
