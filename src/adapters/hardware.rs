//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the button and indicator drivers, exposing them through
//! [`AckInputPort`] and [`IndicatorPort`]. This is the only module in the
//! system that touches actual pins. On non-espidf targets, the underlying
//! drivers use cfg-gated simulation stubs.

use crate::adapters::time::EspClockAdapter;
use crate::app::ports::{AckInputPort, ClockPort, IndicatorPort, PeripheralError};
use crate::drivers::button::AckButton;
use crate::drivers::indicator::IndicatorLed;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    button: AckButton,
    led: IndicatorLed,
    /// Timestamps for the button debounce window; reads the same monotonic
    /// source as the controller's clock port.
    clock: EspClockAdapter,
}

impl HardwareAdapter {
    pub fn new(button: AckButton, led: IndicatorLed, clock: EspClockAdapter) -> Self {
        Self { button, led, clock }
    }
}

// ── AckInputPort implementation ───────────────────────────────

impl AckInputPort for HardwareAdapter {
    fn is_pressed(&mut self) -> Result<bool, PeripheralError> {
        Ok(self.button.is_pressed(self.clock.now_ms()))
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_active(&mut self, on: bool) -> Result<(), PeripheralError> {
        if self.led.set(on) != 0 {
            return Err(PeripheralError::GpioWriteFailed);
        }
        Ok(())
    }
}
