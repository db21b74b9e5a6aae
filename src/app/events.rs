//! Outbound application events.
//!
//! The [`DashboardService`](super::service::DashboardService) and the
//! [`Supervisor`](super::supervisor::Supervisor) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, keep for a test, etc.

use crate::error::Error;
use crate::palette::WarningLevel;
use crate::pollers::{PollOutcome, Source};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A fresh service started with sentinel state.
    Started,

    /// A due source was polled.
    SourcePolled { source: Source, outcome: PollOutcome },

    /// The flex line now shows different text.
    FlexChanged { text: String },

    /// A full cycle ran to the sleep step.
    CycleCompleted(CycleReport),

    /// A cycle aborted; the supervisor will restart.
    CycleFailed(Error),

    /// Fresh state after a failure; `restarts` counts since boot.
    Restarted { restarts: u32 },
}

/// What one cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Cycle number since the service started, from 1.
    pub cycle: u64,
    pub connected: bool,
    pub polled: heapless::Vec<(Source, PollOutcome), 3>,
    pub warning: WarningLevel,
    pub brightness: f32,
}

impl CycleReport {
    pub fn outcome(&self, source: Source) -> Option<&PollOutcome> {
        self.polled.iter().find(|(s, _)| *s == source).map(|(_, o)| o)
    }
}
