//! Reminder controller — the hexagonal core.
//!
//! [`ReminderController`] owns the FSM and its context. It is the single
//! authority over indicator state, the sole consumer of the acknowledgment
//! input, and the sole owner of elapsed-time calculations. All I/O flows
//! through port traits injected at call sites, making the entire controller
//! testable with mock adapters.
//!
//! ```text
//!  AckInputPort ──▶ ┌──────────────────────┐ ──▶ EventSink
//!  ClockPort    ──▶ │  ReminderController  │
//!  IndicatorPort ◀──│        (FSM)         │
//!                   └──────────────────────┘
//! ```

use log::info;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::{AppEvent, TimeRemaining};
use super::ports::{AckInputPort, ClockPort, EventSink, IndicatorPort};

/// What the control loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Re-evaluate immediately — either a reminder is pending (the button
    /// is polled every iteration with no wait) or a transition just
    /// happened and must be reflected without delay.
    Immediate,
    /// Nothing is imminent; perform one bounded low-power wait quantum
    /// before the next tick.
    IdleWait,
}

// ───────────────────────────────────────────────────────────────
// ReminderController
// ───────────────────────────────────────────────────────────────

/// The reminder controller orchestrates all domain logic.
pub struct ReminderController {
    fsm: Fsm,
    ctx: FsmContext,
    tick_count: u64,
}

impl ReminderController {
    /// Construct the controller from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next. The
    /// machine always boots into `NeedsFeeding`: the device cannot know
    /// whether the fish were fed before power-up, so the operator is
    /// expected to acknowledge at power-on.
    pub fn new(config: FeedConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::NeedsFeeding);

        Self {
            fsm,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM and drive the indicator to its initial level.
    pub fn start(&mut self, hw: &mut impl IndicatorPort, sink: &mut impl EventSink) -> Result<()> {
        self.fsm.start(&mut self.ctx);
        self.apply_indicator(hw)?;
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("ReminderController started in {:?}", self.fsm.current_state());
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: poll input → FSM → apply indicator.
    ///
    /// The `hw` parameter satisfies **both** [`AckInputPort`] and
    /// [`IndicatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    ///
    /// A peripheral fault aborts the tick and propagates. The indicator is
    /// re-driven from the FSM command on every tick, so the state/output
    /// pairing is restored on the next successful cycle.
    pub fn tick(
        &mut self,
        hw: &mut (impl AckInputPort + IndicatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<TickOutcome> {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        // 1. Timestamp for this tick. Always taken fresh: the idle wait is
        //    best-effort, so elapsed time is never inferred from it.
        self.ctx.now_ms = clock.now_ms();

        // 2. Poll the button only while a reminder is pending. Presses
        //    during the waiting period are ignored; a stray press must not
        //    push back the countdown.
        self.ctx.ack_pressed = match prev_state {
            StateId::NeedsFeeding => hw.is_pressed()?,
            StateId::Waiting => false,
        };

        // 3. Countdown report, emitted before the threshold check so the
        //    triggering tick still reports.
        if prev_state == StateId::Waiting {
            let remaining =
                TimeRemaining::until_next(self.ctx.config.interval, self.ctx.elapsed_ms());
            sink.emit(&AppEvent::Countdown(remaining));
        }

        // 4. FSM tick (pure state logic).
        self.fsm.tick(&mut self.ctx);

        // 5. Apply the indicator command via IndicatorPort.
        self.apply_indicator(hw)?;

        // 6. Emit events if the FSM moved.
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            match new_state {
                StateId::Waiting => sink.emit(&AppEvent::Acknowledged {
                    at_ms: self.ctx.last_ack_ms,
                }),
                StateId::NeedsFeeding => sink.emit(&AppEvent::ReminderRaised),
            }
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // A steady Waiting tick is the only place the low-power wait is
        // allowed: a fresh acknowledgment or a just-raised reminder must be
        // re-evaluated without delay, and a pending reminder keeps polling
        // the button at loop rate.
        if prev_state == StateId::Waiting && new_state == StateId::Waiting {
            Ok(TickOutcome::IdleWait)
        } else {
            Ok(TickOutcome::Immediate)
        }
    }

    /// Unbounded control loop: tick, then wait when nothing is imminent.
    ///
    /// Runs until the first peripheral fault, which propagates to the
    /// caller; the binary decides shutdown behavior.
    pub fn run(
        &mut self,
        hw: &mut (impl AckInputPort + IndicatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        loop {
            match self.tick(hw, clock, sink)? {
                TickOutcome::IdleWait => clock.idle_wait(self.ctx.config.idle_wait_ms),
                TickOutcome::Immediate => {}
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// The indicator level the FSM currently commands.
    pub fn indicator_commanded_on(&self) -> bool {
        self.ctx.commands.indicator_on
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate the FSM indicator command into a port call. Idempotent;
    /// called after every tick so output and state never stay divergent.
    fn apply_indicator(&self, hw: &mut impl IndicatorPort) -> Result<()> {
        hw.set_active(self.ctx.commands.indicator_on)?;
        Ok(())
    }
}
