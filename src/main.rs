//! FeedMinder Firmware — Main Entry Point
//!
//! Hexagonal architecture around a two-state reminder FSM:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter    LogEventSink   NvsAdapter   EspClock │
//! │  (AckInput+Indicator) (EventSink)  (ConfigPort) (Clock)  │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │        ReminderController (pure logic)             │  │
//! │  │        NeedsFeeding ⇄ Waiting FSM                  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The control loop polls the acknowledgment button while a reminder is
//! pending and light-sleeps in one-minute quanta while counting down.
//! Process exit: this binary returns `Err` (non-zero) only on an unhandled
//! peripheral fault; there is no operator stop signal on the bare board —
//! the device runs until power-off.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use feedminder::adapters::hardware::HardwareAdapter;
use feedminder::adapters::log_sink::LogEventSink;
use feedminder::adapters::nvs::NvsAdapter;
use feedminder::adapters::time::EspClockAdapter;
use feedminder::app::ports::{ConfigError, ConfigPort};
use feedminder::app::service::ReminderController;
use feedminder::config::FeedConfig;
use feedminder::drivers::button::AckButton;
use feedminder::drivers::hw_init;
use feedminder::drivers::indicator::IndicatorLed;
use feedminder::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("FeedMinder v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Hardware init ──────────────────────────────────────
    hw_init::init_peripherals()?;

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new() {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => {
                info!("Config loaded from NVS");
                cfg
            }
            Err(ConfigError::NotFound) => {
                let cfg = FeedConfig::default();
                // Seed the namespace so later tooling can edit it in place.
                if let Err(e) = nvs.save(&cfg) {
                    warn!("NVS config seed failed ({}), continuing", e);
                }
                info!("First boot: default config written to NVS");
                cfg
            }
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                FeedConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            FeedConfig::default()
        }
    };

    info!(
        "Reminder interval: {}h{:02}m, idle wait {}ms",
        config.interval.hours, config.interval.minutes, config.idle_wait_ms
    );
    // The device boots with the reminder active — feed the fish at
    // power-on so the countdown starts aligned with reality.

    // ── 4. Construct adapters ─────────────────────────────────
    let mut hw = HardwareAdapter::new(
        AckButton::new(pins::BUTTON_GPIO),
        IndicatorLed::new(pins::INDICATOR_GPIO),
        EspClockAdapter::new(),
    );
    let mut clock = EspClockAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 5. Construct controller and enter the control loop ────
    let mut controller = ReminderController::new(config);
    controller.start(&mut hw, &mut sink)?;

    info!("System ready. Entering control loop.");
    controller.run(&mut hw, &mut clock, &mut sink)?;
    Ok(())
}
