//! ESP32 clock adapter.
//!
//! Implements [`ClockPort`] for the FeedMinder system.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic) and
//!   uses timer-wakeup light sleep for the idle wait.
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` and
//!   `std::thread::sleep` for host-side testing and simulation.

use crate::app::ports::ClockPort;

/// Clock adapter for the ESP32-C3 platform.
pub struct EspClockAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for EspClockAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EspClockAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for EspClockAdapter {
    /// Milliseconds since boot, truncated to the wrapping u32 tick domain.
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u32 {
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1_000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }

    /// Timer-wakeup light sleep. The CPU halts but the RTC keeps counting,
    /// so `now_ms()` stays monotonic across the suspension. Wake latency is
    /// not guaranteed — callers recompute elapsed time after this returns.
    #[cfg(target_os = "espidf")]
    fn idle_wait(&mut self, duration_ms: u32) {
        // SAFETY: single-threaded main-loop context; light sleep returns
        // control here after the timer wakeup fires.
        unsafe {
            esp_idf_svc::sys::esp_sleep_enable_timer_wakeup(u64::from(duration_ms) * 1_000);
            esp_idf_svc::sys::esp_light_sleep_start();
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn idle_wait(&mut self, duration_ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(duration_ms)));
    }
}
