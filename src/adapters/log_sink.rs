//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | fresh state");
            }
            AppEvent::SourcePolled { source, outcome } => {
                if outcome.is_updated() {
                    info!("POLL  | {} | {}", source.label(), outcome);
                } else {
                    warn!("POLL  | {} | {}", source.label(), outcome);
                }
            }
            AppEvent::FlexChanged { text } => {
                info!("FLEX  | {}", text);
            }
            AppEvent::CycleCompleted(r) => {
                info!(
                    "CYCLE | #{} | online={} | polled={} | led={:?} | backlight={:.2}",
                    r.cycle,
                    r.connected,
                    r.polled.len(),
                    r.warning,
                    r.brightness,
                );
            }
            AppEvent::CycleFailed(e) => {
                warn!("FAIL  | {}", e);
            }
            AppEvent::Restarted { restarts } => {
                info!("RESTART | #{}", restarts);
            }
        }
    }
}
