//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ReminderController (domain)
//! ```
//!
//! Driven adapters (GPIO, system timer, log output, NVS) implement these
//! traits. The [`ReminderController`](super::service::ReminderController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! All port errors are typed — callers must handle every variant explicitly.

use crate::config::FeedConfig;

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → output pin)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain drives the reminder indicator through this.
pub trait IndicatorPort {
    /// Drive the indicator line: `true` = reminder active.
    fn set_active(&mut self, on: bool) -> Result<(), PeripheralError>;
}

// ───────────────────────────────────────────────────────────────
// Acknowledgment input port (driven adapter: input pin → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the debounced level of the feed-acknowledge button.
/// `true` means logically active (pressed).
pub trait AckInputPort {
    fn is_pressed(&mut self) -> Result<bool, PeripheralError>;
}

// ───────────────────────────────────────────────────────────────
// Monotonic clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source and best-effort low-power wait.
pub trait ClockPort {
    /// Milliseconds since boot. Monotonic, wraps at `u32::MAX`; consumers
    /// must use modular subtraction for elapsed-time computation.
    fn now_ms(&self) -> u32;

    /// Suspend for roughly `duration_ms`. This is a power-saving wait, not
    /// a precise timer — callers recompute elapsed time from `now_ms()` on
    /// wake rather than assuming the full duration passed.
    fn idle_wait(&mut self, duration_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, etc.).
/// Purely observability — never correctness.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (load-time only)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the feed configuration.
///
/// Implementations MUST validate before persisting and after loading.
/// Invalid ranges are rejected with [`ConfigError::ValidationFailed`],
/// not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    fn load(&self) -> Result<FeedConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &FeedConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`IndicatorPort`] and [`AckInputPort`] operations.
///
/// A peripheral fault is fatal for the current tick and propagates; there
/// is no retry machinery because a missed button read is simply re-polled
/// on the next loop iteration as part of normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    /// GPIO read returned an error.
    GpioReadFailed,
    /// GPIO write returned an error.
    GpioWriteFailed,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for PeripheralError {}
impl core::error::Error for ConfigError {}
