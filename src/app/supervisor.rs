//! Outer restart loop.
//!
//! Any error escaping a cycle throws the whole service away: the
//! supervisor logs it, cools down, and starts over with fresh sentinel
//! state (the clock correction included).  Nothing a cycle does can
//! stop the loop.

use log::{error, info};

use crate::config::DashboardConfig;

use super::events::AppEvent;
use super::ports::{DashboardIo, EventSink};
use super::service::DashboardService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorStats {
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub restarts: u32,
}

pub struct Supervisor {
    config: DashboardConfig,
    service: DashboardService,
    started: bool,
    stats: SupervisorStats,
}

impl Supervisor {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            service: DashboardService::new(config.clone()),
            config,
            started: false,
            stats: SupervisorStats::default(),
        }
    }

    /// Run exactly `n` cycle attempts, restarting after each failure.
    pub fn run_cycles(
        &mut self,
        n: u64,
        io: &mut impl DashboardIo,
        sink: &mut impl EventSink,
    ) -> SupervisorStats {
        for _ in 0..n {
            self.step(io, sink);
        }
        self.stats
    }

    pub fn run_forever(&mut self, io: &mut impl DashboardIo, sink: &mut impl EventSink) -> ! {
        loop {
            self.step(io, sink);
        }
    }

    /// One cycle attempt.  Returns whether it completed.
    pub fn step(&mut self, io: &mut impl DashboardIo, sink: &mut impl EventSink) -> bool {
        if !self.started {
            self.service.start(sink);
            self.started = true;
        }

        match self.service.tick(io, sink) {
            Ok(_) => {
                self.stats.cycles_completed += 1;
                true
            }
            Err(e) => {
                error!("Main loop failed: {} — retrying in {}s", e, self.config.failure_cooldown_secs);
                self.stats.cycles_failed += 1;
                sink.emit(&AppEvent::CycleFailed(e));
                io.sleep_secs(self.config.failure_cooldown_secs);
                self.restart(sink);
                false
            }
        }
    }

    fn restart(&mut self, sink: &mut impl EventSink) {
        self.service = DashboardService::new(self.config.clone());
        self.stats.restarts += 1;
        info!("Supervisor: restart #{} with fresh state", self.stats.restarts);
        sink.emit(&AppEvent::Restarted {
            restarts: self.stats.restarts,
        });
        self.service.start(sink);
    }

    pub fn service(&self) -> &DashboardService {
        &self.service
    }

    pub fn stats(&self) -> SupervisorStats {
        self.stats
    }
}
