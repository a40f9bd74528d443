//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::Acknowledged { at_ms } => {
                info!("FED | the fish have been fed (t={}ms)", at_ms);
            }
            AppEvent::ReminderRaised => {
                info!("REMIND | feeding due, indicator on");
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Countdown(remaining) => {
                info!("COUNTDOWN | {}", remaining.render());
            }
        }
    }
}
