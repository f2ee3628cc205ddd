//! Controller loop — the hexagonal core.
//!
//! [`Controller`] owns the relay/fan bookkeeping and runs one control
//! cycle per probe interval.  All I/O flows through port traits injected
//! at call sites, making the loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ ReportPort
//!                 │       Controller       │
//! ActuatorPort ◀──│  fan curve · relay FSM │ ──▶ EventSink
//!                 └────────────────────────┘
//! ```
//!
//! ## States
//!
//! | State     | Relay      | Duty    |
//! |-----------|------------|---------|
//! | `IdleOff` | disengaged | 0       |
//! | `Active`  | engaged    | 10–100  |
//!
//! The relay is only written on a transition; the duty cycle is written
//! every tick.  A failed write on a transition tick leaves the controller
//! in the state it started the tick in.

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::fan_curve::fan_speed;
use crate::error::ActuatorError;
use crate::shutdown::ShutdownSignal;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, ReportPort, SensorPort};
use super::reading::{ActuatorState, Reading};

/// The two controller states, derived from the last commanded actuators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanState {
    IdleOff,
    Active { duty: u8 },
}

/// Result of a single [`Controller::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The probe was read and actuators were commanded.
    Actuated(Reading),
    /// The probe failed; nothing was written or reported.
    Skipped,
}

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    target_c: f64,
    interval: Duration,
    /// Last relay level the hardware acknowledged.
    relay_engaged: bool,
    duty_cycle: u8,
    last_reading: Option<Reading>,
    tick_count: u64,
    sensor_faults: u32,
}

impl Controller {
    /// Construct from configuration.  Assumes the actuators start
    /// de-energised (the hardware adapter drives them low on bind).
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            target_c: config.target_temperature_c,
            interval: config.probe_interval(),
            relay_engaged: false,
            duty_cycle: 0,
            last_reading: None,
            tick_count: 0,
            sensor_faults: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            target_c: self.target_c,
        });
        info!(
            "Controller started: target={:.1}\u{00b0}C interval={:?}",
            self.target_c, self.interval
        );
    }

    /// Sample, actuate and report until `signal` fires.
    ///
    /// The signal is checked before every tick and interrupts the
    /// inter-sample wait, so the loop ends after the tick in progress.
    /// Actuators are left as they are; call [`shutdown`](Self::shutdown)
    /// afterwards.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        reporter: &mut impl ReportPort,
        sink: &mut impl EventSink,
        signal: &ShutdownSignal,
    ) {
        while !signal.is_triggered() {
            self.tick(hw, reporter, sink);
            if signal.wait_timeout(self.interval) {
                break;
            }
        }
        info!("Sampling loop stopped after {} ticks", self.tick_count);
    }

    /// Return the actuators to the de-energised state.
    ///
    /// Both writes are always issued, whatever the tracked state says.
    /// Returns the first failure after attempting both.
    pub fn shutdown(
        &mut self,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> Result<(), ActuatorError> {
        let duty = hw.set_duty_cycle(0);
        if duty.is_ok() {
            self.duty_cycle = 0;
        }
        let relay = hw.set_relay(false);
        if relay.is_ok() {
            self.relay_engaged = false;
        }
        sink.emit(&AppEvent::Stopped {
            ticks: self.tick_count,
        });
        duty.and(relay)
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read → speed → actuators → report.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        reporter: &mut impl ReportPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;

        // 1. Sample
        let celsius = match hw.read_temperature() {
            Ok(c) => c,
            Err(error) => {
                self.sensor_faults = self.sensor_faults.saturating_add(1);
                warn!(
                    "Sensor error: {} ({} in a row), skipping tick {}",
                    error, self.sensor_faults, self.tick_count
                );
                sink.emit(&AppEvent::SensorFault {
                    error,
                    consecutive: self.sensor_faults,
                });
                return TickOutcome::Skipped;
            }
        };
        if self.sensor_faults > 0 {
            info!("Sensor recovered after {} failed reads", self.sensor_faults);
            self.sensor_faults = 0;
        }
        let reading = Reading::now(celsius);
        self.last_reading = Some(reading);

        // 2. Speed
        let duty = fan_speed(celsius, self.target_c);

        // 3./4. Actuators
        self.apply(duty, hw, sink);

        // 5. Report (returns immediately)
        reporter.dispatch(reading);

        sink.emit(&AppEvent::Telemetry(TelemetryData {
            tick: self.tick_count,
            temperature_c: celsius,
            target_c: self.target_c,
            state: self.state(),
        }));

        TickOutcome::Actuated(reading)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> FanState {
        if self.relay_engaged && self.duty_cycle > 0 {
            FanState::Active {
                duty: self.duty_cycle,
            }
        } else {
            FanState::IdleOff
        }
    }

    pub fn actuator_state(&self) -> ActuatorState {
        ActuatorState {
            relay_engaged: self.relay_engaged,
            duty_cycle: self.duty_cycle,
        }
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    /// Total ticks executed, including skipped ones.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn consecutive_sensor_faults(&self) -> u32 {
        self.sensor_faults
    }

    pub fn target_c(&self) -> f64 {
        self.target_c
    }

    // ── Internal ──────────────────────────────────────────────

    /// Command relay and fan for `duty`.
    ///
    /// On a transition tick the relay and duty writes succeed or fail
    /// together: a failed relay write skips the duty write, and a failed
    /// duty write returns the relay to its previous level.  The tracked
    /// state keeps `duty == 0` exactly when the relay is released, and the
    /// transition is retried next tick.
    fn apply(&mut self, duty: u8, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let engage = duty > 0;
        let transition = engage != self.relay_engaged;

        if transition {
            if let Err(e) = hw.set_relay(engage) {
                warn!("Relay write failed: {}, duty held at {}%", e, self.duty_cycle);
                sink.emit(&AppEvent::ActuatorFault(e));
                return;
            }
            self.relay_engaged = engage;
        }

        match hw.set_duty_cycle(duty) {
            Ok(()) => {
                if duty != self.duty_cycle {
                    debug!("Duty {}% -> {}%", self.duty_cycle, duty);
                }
                self.duty_cycle = duty;
            }
            Err(e) => {
                warn!("Duty write failed: {}", e);
                sink.emit(&AppEvent::ActuatorFault(e));
                if transition {
                    self.revert_relay(hw, sink);
                    return;
                }
            }
        }

        if transition {
            info!("Relay {}", if engage { "ON" } else { "OFF" });
            sink.emit(&AppEvent::RelayChanged { engaged: engage });
        }
    }

    fn revert_relay(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let previous = !self.relay_engaged;
        match hw.set_relay(previous) {
            Ok(()) => self.relay_engaged = previous,
            Err(e) => {
                warn!("Relay rollback failed: {}", e);
                sink.emit(&AppEvent::ActuatorFault(e));
            }
        }
    }
}
