//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (probe, relay/fan, HTTP reporter, event sinks) implement
//! these traits.  The [`Controller`](super::controller::Controller) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::{ActuatorError, SensorError};

use super::events::AppEvent;
use super::reading::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain polls this once per tick.
pub trait SensorPort {
    /// Current probe temperature in degrees Celsius.
    fn read_temperature(&mut self) -> Result<f64, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the relay and fan.
///
/// Only the sampling loop holds the implementor, so writes never
/// interleave.
pub trait ActuatorPort {
    /// Energise (`true`) or release (`false`) the fan power relay.
    fn set_relay(&mut self, engaged: bool) -> Result<(), ActuatorError>;

    /// Set the fan PWM duty cycle (0–100).
    fn set_duty_cycle(&mut self, duty: u8) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Report port (driven adapter: domain → network)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget delivery of readings.
///
/// `dispatch` must return without waiting on the network; delivery
/// failures stay inside the implementor.
pub trait ReportPort {
    fn dispatch(&mut self, reading: Reading);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
