//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  NEEDS_FEEDING ──[ack pressed]──▶ WAITING
//!        ▲                             │
//!        └──────[elapsed >= interval]──┘
//! ```
//!
//! The indicator is lit exactly while the machine is in `NeedsFeeding`;
//! each `on_enter` rewrites the indicator command so the pairing holds
//! across every transition.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — NeedsFeeding
        StateDescriptor {
            id: StateId::NeedsFeeding,
            name: "NeedsFeeding",
            on_enter: Some(needs_feeding_enter),
            on_exit: None,
            on_update: needs_feeding_update,
        },
        // Index 1 — Waiting
        StateDescriptor {
            id: StateId::Waiting,
            name: "Waiting",
            on_enter: Some(waiting_enter),
            on_exit: None,
            on_update: waiting_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NEEDS_FEEDING state — reminder active, button armed
// ═══════════════════════════════════════════════════════════════════════════

fn needs_feeding_enter(ctx: &mut FsmContext) {
    ctx.commands.indicator_on = true;
    info!("NEEDS_FEEDING: indicator on, awaiting acknowledgment");
}

fn needs_feeding_update(ctx: &mut FsmContext) -> Option<StateId> {
    // The controller polls the button only in this state, so a press here
    // is always a fresh acknowledgment.
    if ctx.ack_pressed {
        ctx.last_ack_ms = ctx.now_ms;
        return Some(StateId::Waiting);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING state — counting down to the next reminder
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut FsmContext) {
    ctx.commands.indicator_on = false;
    info!(
        "WAITING: acknowledged at t={}ms, next reminder in {}ms",
        ctx.last_ack_ms, ctx.interval_ms
    );
}

fn waiting_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Inclusive comparison: the reminder fires on the exact interval tick.
    if ctx.elapsed_ms() >= ctx.interval_ms {
        return Some(StateId::NeedsFeeding);
    }
    None
}
