//! Hang guard for the refresh loop.
//!
//! A cycle is allowed to block for at most [`TIMEOUT_MS`]. Errors are the
//! supervisor's business; this only catches a driver call that never
//! returns (a wedged HTTP socket, an I2C bus held low).
//!
//! Nobody feeds it per cycle. [`SystemClock`](crate::adapters::time::SystemClock)
//! feeds it once per second of every sleep, and each cycle ends in a sleep,
//! so the only unfed stretch is the work between two sleeps.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{self, esp, EspError};

/// Longest blocking stretch between two sleeps: one HTTP fetch plus the
/// SCD-30 read, with margin.
pub const TIMEOUT_MS: u32 = 30_000;

pub struct Watchdog {
    /// `false` when the task could not be registered; feeding is then a no-op.
    #[cfg(target_os = "espidf")]
    armed: bool,
    #[cfg(not(target_os = "espidf"))]
    feeds: core::cell::Cell<u64>,
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn arm_current_task() -> Result<(), EspError> {
    let cfg = sys::esp_task_wdt_config_t {
        timeout_ms: TIMEOUT_MS,
        idle_core_mask: 0,
        trigger_panic: true,
    };
    // Fails harmlessly when the bootloader already started the TWDT.
    if let Err(e) = esp!(unsafe { sys::esp_task_wdt_reconfigure(&cfg) }) {
        log::debug!("watchdog timeout left as configured: {e}");
    }
    esp!(unsafe { sys::esp_task_wdt_add(core::ptr::null_mut()) })
}

impl Watchdog {
    /// Arm the hang guard for the calling task.
    ///
    /// Must be called from the task that runs the refresh loop. A failure
    /// to register is logged and the dashboard runs unguarded.
    pub fn new() -> Self {
        #[cfg(target_os = "espidf")]
        {
            let armed = match arm_current_task() {
                Ok(()) => {
                    log::info!("refresh loop guarded, resets after {} s stalled", TIMEOUT_MS / 1000);
                    true
                }
                Err(e) => {
                    log::warn!("refresh loop unguarded: {e}");
                    false
                }
            };
            Self { armed }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            Self {
                feeds: core::cell::Cell::new(0),
            }
        }
    }

    /// Restart the countdown.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            // Only fails for an unregistered task, which `armed` rules out.
            if self.armed {
                unsafe {
                    sys::esp_task_wdt_reset();
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        self.feeds.set(self.feeds.get() + 1);
    }

    /// Host only: how many times the countdown was restarted.
    #[cfg(not(target_os = "espidf"))]
    pub fn feed_count(&self) -> u64 {
        self.feeds.get()
    }
}

#[cfg(test)]
#[cfg(not(target_os = "espidf"))]
mod tests {
    use super::*;

    #[test]
    fn counts_each_feed() {
        let dog = Watchdog::default();
        assert_eq!(dog.feed_count(), 0);
        dog.feed();
        dog.feed();
        assert_eq!(dog.feed_count(), 2);
    }

    #[test]
    fn outlasts_a_stalled_fetch() {
        use crate::adapters::http::REQUEST_TIMEOUT_MS;
        assert!(TIMEOUT_MS >= 2 * REQUEST_TIMEOUT_MS);
    }
}
