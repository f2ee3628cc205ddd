//! Sensor subsystem.
//!
//! A single 1-Wire temperature probe; multi-sensor aggregation is not
//! needed on this board.

pub mod temperature;

pub use temperature::W1ThermSensor;
