//! Refresh scheduler.
//!
//! Each source has its own cadence.  The service asks once per cycle
//! which sources are due; the scheduler stamps them as run at that
//! instant whether or not the poll then succeeds, so a failing API is
//! retried on its normal cadence rather than hammered every cycle.
//!
//! ```text
//!   cycle ──► take_due(now, connected)
//!                 │
//!                 ├─ weather      every  601s  (network)
//!                 ├─ air quality  every 3307s  (network)
//!                 └─ inside       every   47s
//! ```

use log::debug;

use crate::config::DashboardConfig;
use crate::pollers::Source;

// ═══════════════════════════════════════════════════════════════
//  Cadence
// ═══════════════════════════════════════════════════════════════

/// Per-source bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    pub source: Source,
    pub interval_secs: u32,
    /// Clock reading when the source was last due; `None` until first run.
    pub last_run: Option<i64>,
}

impl Cadence {
    pub const fn new(source: Source, interval_secs: u32) -> Self {
        Self {
            source,
            interval_secs,
            last_run: None,
        }
    }

    /// Never run, or strictly more than one interval ago.
    pub fn is_due(&self, now: i64) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now - last > i64::from(self.interval_secs),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Due sources for one cycle, in polling order.
pub type DueSources = heapless::Vec<Source, 3>;

pub struct RefreshScheduler {
    cadences: [Cadence; 3],
}

impl RefreshScheduler {
    pub fn new(weather_secs: u32, air_quality_secs: u32, sensor_secs: u32) -> Self {
        Self {
            cadences: [
                Cadence::new(Source::Weather, weather_secs),
                Cadence::new(Source::AirQuality, air_quality_secs),
                Cadence::new(Source::Inside, sensor_secs),
            ],
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(
            config.weather_interval_secs,
            config.air_quality_interval_secs,
            config.sensor_interval_secs,
        )
    }

    /// Sources due at `now`, stamped as run.  Network sources are
    /// neither returned nor stamped while disconnected, so they fire on
    /// the first connected cycle.
    pub fn take_due(&mut self, now: i64, connected: bool) -> DueSources {
        let mut due = DueSources::new();
        for cadence in self.cadences.iter_mut() {
            if cadence.source.needs_network() && !connected {
                continue;
            }
            if cadence.is_due(now) {
                debug!(
                    "Scheduler: {} due (every {}s)",
                    cadence.source.label(),
                    cadence.interval_secs
                );
                cadence.last_run = Some(now);
                // Capacity equals the number of cadences.
                let _ = due.push(cadence.source);
            }
        }
        due
    }

    pub fn cadence(&self, source: Source) -> Option<&Cadence> {
        self.cadences.iter().find(|c| c.source == source)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
