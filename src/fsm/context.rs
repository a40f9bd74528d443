//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to. It carries the latest input poll, the monotonic timestamp for
//! this tick, the acknowledgment bookkeeping, and the indicator command
//! output.

use crate::config::FeedConfig;

/// Output command written by state handlers; applied to the indicator port
/// by the controller after each FSM tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorCommand {
    /// Desired indicator level: `true` = reminder active.
    pub indicator_on: bool,
}

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Monotonic timestamp for the current tick (milliseconds, wraps).
    pub now_ms: u32,
    /// Tick recorded at the most recent acknowledgment.
    /// Meaningful only while the machine is in `Waiting`.
    pub last_ack_ms: u32,
    /// Fixed reminder interval in milliseconds, converted once at startup.
    pub interval_ms: u32,

    // -- Input --
    /// Debounced acknowledgment level for this tick. The controller polls
    /// the input only while a reminder is pending; otherwise this is false.
    pub ack_pressed: bool,

    // -- Output --
    /// Indicator command to be applied after the FSM tick.
    pub commands: IndicatorCommand,

    // -- Configuration --
    pub config: FeedConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: FeedConfig) -> Self {
        Self {
            now_ms: 0,
            last_ack_ms: 0,
            interval_ms: config.interval_ms(),
            ack_pressed: false,
            commands: IndicatorCommand::default(),
            config,
        }
    }

    /// Milliseconds since the last acknowledgment, wraparound-safe.
    ///
    /// The tick counter wraps at `u32::MAX`; modular subtraction yields the
    /// correct forward duration across the wrap.
    pub fn elapsed_ms(&self) -> u32 {
        self.now_ms.wrapping_sub(self.last_ack_ms)
    }
}
