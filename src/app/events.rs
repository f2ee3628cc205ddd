//! Outbound application events.
//!
//! The [`Controller`](super::controller::Controller) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use crate::error::{ActuatorError, SensorError};

use super::controller::FanState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the configured target).
    Started { target_c: f64 },

    /// Per-tick telemetry snapshot.
    Telemetry(TelemetryData),

    /// The relay was switched.
    RelayChanged { engaged: bool },

    /// The probe could not be read; actuation skipped this tick.
    SensorFault {
        error: SensorError,
        consecutive: u32,
    },

    /// A relay or PWM write failed.
    ActuatorFault(ActuatorError),

    /// Actuators were returned to the safe state.
    Stopped { ticks: u64 },
}

/// A point-in-time snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub tick: u64,
    pub temperature_c: f64,
    pub target_c: f64,
    pub state: FanState,
}
