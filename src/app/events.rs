//! Outbound application events.
//!
//! The [`ReminderController`](super::service::ReminderController) emits
//! these through the [`EventSink`](super::ports::EventSink) port. Adapters
//! on the other side decide what to do with them — log to serial, etc.

use core::fmt::Write as _;

use crate::config::{FeedInterval, MS_PER_HOUR, MS_PER_MINUTE};
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The controller has started (carries initial state).
    Started(StateId),

    /// A feeding was acknowledged; the countdown has been reset.
    Acknowledged {
        /// Monotonic tick at which the acknowledgment was recorded.
        at_ms: u32,
    },

    /// The interval elapsed and the reminder re-activated.
    ReminderRaised,

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Periodic countdown report while waiting.
    Countdown(TimeRemaining),
}

/// Time until the next reminder, decomposed for human-readable reporting.
///
/// When the interval is configured in whole hours, the minutes component
/// is suppressed entirely rather than showing the sub-hour remainder —
/// the report then counts whole hours only. Remaining time at or past
/// the deadline is reported as zero/negative; the threshold comparison in
/// the FSM is what actually triggers, never this report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRemaining {
    pub hours: i32,
    pub minutes: i32,
}

impl TimeRemaining {
    /// Remaining whole hours and minutes until `interval` elapses.
    pub fn until_next(interval: FeedInterval, elapsed_ms: u32) -> Self {
        let remaining_ms = i64::from(interval.checked_ms().unwrap_or(u32::MAX))
            - i64::from(elapsed_ms);
        let hours = (remaining_ms / i64::from(MS_PER_HOUR)) as i32;
        let minutes = if interval.minutes == 0 {
            0
        } else {
            ((remaining_ms % i64::from(MS_PER_HOUR)) / i64::from(MS_PER_MINUTE)) as i32
        };
        Self { hours, minutes }
    }

    /// Render the countdown line without allocating.
    pub fn render(&self) -> heapless::String<64> {
        let mut s = heapless::String::new();
        // Worst-case i32 digits fit well inside the 64-byte capacity.
        let _ = write!(
            s,
            "{} hour(s) {} minute(s) until next feeding",
            self.hours, self.minutes
        );
        s
    }
}
