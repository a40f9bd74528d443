//! System configuration parameters
//!
//! All tunable parameters for the FeedMinder system.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

pub const MS_PER_MINUTE: u32 = 60 * 1000;
pub const MS_PER_HOUR: u32 = 60 * 60 * 1000;

/// Time between an acknowledged feeding and the next reminder.
///
/// Hours and minutes are unsigned by construction; the only load-time
/// validation needed is that the total fits the 32-bit millisecond tick
/// domain (~49.7 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedInterval {
    pub hours: u32,
    pub minutes: u32,
}

impl FeedInterval {
    /// Total interval in milliseconds, `None` if it overflows the tick domain.
    pub fn checked_ms(&self) -> Option<u32> {
        let total_minutes = u64::from(self.hours) * 60 + u64::from(self.minutes);
        u32::try_from(total_minutes * 60 * 1000).ok()
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How long after an acknowledged feeding before the reminder re-activates.
    pub interval: FeedInterval,
    /// Light-sleep quantum between polls while waiting (milliseconds).
    pub idle_wait_ms: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval: FeedInterval { hours: 6, minutes: 0 },
            idle_wait_ms: MS_PER_MINUTE, // wake once a minute while waiting
        }
    }
}

impl FeedConfig {
    /// Range-check the configuration. Adapters call this before persisting
    /// and after loading, so the controller never sees an invalid interval.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.interval.checked_ms().is_none() {
            return Err("feed interval exceeds the 32-bit millisecond tick range");
        }
        if self.idle_wait_ms == 0 {
            return Err("idle wait quantum must be non-zero");
        }
        Ok(())
    }

    /// The configured interval in milliseconds.
    ///
    /// Config is validated at load time; saturates instead of wrapping if
    /// that contract is broken.
    pub fn interval_ms(&self) -> u32 {
        self.interval.checked_ms().unwrap_or(u32::MAX)
    }
}
