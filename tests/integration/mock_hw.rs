//! Mock hardware adapters for integration tests.
//!
//! Record every indicator write and scripted button level so tests can
//! assert on the full command history without touching real GPIO.

use feedminder::app::events::AppEvent;
use feedminder::app::ports::{
    AckInputPort, ClockPort, EventSink, IndicatorPort, PeripheralError,
};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Scripted debounced button level returned by `is_pressed`.
    pub pressed: bool,
    /// Every `set_active` call in order.
    pub indicator_writes: Vec<bool>,
    /// Number of times the button was polled.
    pub read_count: usize,
    /// Fault injection.
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            pressed: false,
            indicator_writes: Vec::new(),
            read_count: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// The level currently driven on the indicator line (false before any
    /// write, like a freshly reset output pin).
    pub fn indicator_on(&self) -> bool {
        self.indicator_writes.last().copied().unwrap_or(false)
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl AckInputPort for MockHardware {
    fn is_pressed(&mut self) -> Result<bool, PeripheralError> {
        if self.fail_reads {
            return Err(PeripheralError::GpioReadFailed);
        }
        self.read_count += 1;
        Ok(self.pressed)
    }
}

impl IndicatorPort for MockHardware {
    fn set_active(&mut self, on: bool) -> Result<(), PeripheralError> {
        if self.fail_writes {
            return Err(PeripheralError::GpioWriteFailed);
        }
        self.indicator_writes.push(on);
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Manually-advanced monotonic clock. `idle_wait` records the requested
/// quantum and advances time by it, simulating the suspension.
pub struct MockClock {
    now: u32,
    pub waits: Vec<u32>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            now: 0,
            waits: Vec::new(),
        }
    }

    pub fn set(&mut self, now_ms: u32) {
        self.now = now_ms;
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn idle_wait(&mut self, duration_ms: u32) {
        self.waits.push(duration_ms);
        self.now = self.now.wrapping_add(duration_ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count_acks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Acknowledged { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
