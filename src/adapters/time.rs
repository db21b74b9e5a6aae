//! ESP32 time adapter.
//!
//! Implements [`ClockPort`] with a monotonic seconds counter.  The
//! dashboard never trusts this clock for the wall time; it only needs
//! differences between readings and a stable base for the correction.
//!
//! Sleeps are sliced into one-second steps that feed the task watchdog.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` and
//!   sleeps through FreeRTOS so the idle task keeps running.
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side simulation.

use crate::app::ports::ClockPort;
use crate::drivers::watchdog::Watchdog;

pub struct SystemClock {
    watchdog: Watchdog,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new(watchdog: Watchdog) -> Self {
        Self {
            watchdog,
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_secs(&self) -> i64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000_000
    }

    /// Seconds since construction (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_secs(&self) -> i64 {
        self.start.elapsed().as_secs() as i64
    }

    pub fn watchdog(&self) -> &Watchdog {
        &self.watchdog
    }

    #[cfg(target_os = "espidf")]
    fn sleep_one_second() {
        esp_idf_hal::delay::FreeRtos::delay_ms(1000);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_one_second() {
        std::thread::sleep(std::time::Duration::from_secs(1));
    }
}

impl ClockPort for SystemClock {
    fn now_secs(&self) -> i64 {
        self.uptime_secs()
    }

    fn sleep_secs(&mut self, secs: u32) {
        self.watchdog.feed();
        for _ in 0..secs {
            Self::sleep_one_second();
            self.watchdog.feed();
        }
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn starts_near_zero_and_is_monotonic() {
        let clock = SystemClock::new(Watchdog::new());
        let a = clock.now_secs();
        let b = clock.now_secs();
        assert!((0..2).contains(&a));
        assert!(b >= a);
    }

    #[test]
    fn sleep_feeds_watchdog_every_second() {
        let mut clock = SystemClock::new(Watchdog::new());
        clock.sleep_secs(0);
        assert_eq!(clock.watchdog().feed_count(), 1);
        clock.sleep_secs(1);
        assert_eq!(clock.watchdog().feed_count(), 3);
    }
}
