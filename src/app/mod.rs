//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the rules for the fan controller: the per-tick
//! sample → speed → actuate → report cycle and its two-state machine.
//! All interaction with hardware and the network happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod controller;
pub mod events;
pub mod ports;
pub mod reading;
