//! GPIO pin assignments for the FeedMinder board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

/// Feed indicator LED, through a 220 Ω resistor to ground.
/// Driven HIGH while a feeding is due, LOW once acknowledged.
pub const INDICATOR_GPIO: i32 = 4;

/// Momentary feed-acknowledge button to 3V3, with pull-down.
/// Reads HIGH while pressed.
pub const BUTTON_GPIO: i32 = 5;
