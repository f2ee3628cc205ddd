//! Transient domain values produced each tick.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single probe sample.  Produced once per successful tick, copied into
/// the reporter and then discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub celsius: f64,
    pub taken_at: DateTime<Utc>,
}

impl Reading {
    /// Stamp `celsius` with the current wall-clock time.
    pub fn now(celsius: f64) -> Self {
        Self {
            celsius,
            taken_at: Utc::now(),
        }
    }

    /// Body sent to the report endpoint.
    pub fn payload(&self) -> ReportPayload {
        ReportPayload {
            value: self.celsius,
        }
    }
}

/// Wire format of a temperature report: `{"value": <celsius>}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportPayload {
    pub value: f64,
}

/// What the controller last commanded the relay and fan to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub relay_engaged: bool,
    /// PWM duty cycle, 0–100.
    pub duty_cycle: u8,
}
