//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the FeedMinder system: the
//! two-state reminder FSM and its orchestration. All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
