//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the probe and both actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches actual hardware, and only the sampling loop holds it.

use std::path::Path;

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::{FanDriver, RelayDriver};
use crate::error::{ActuatorError, Result, SensorError};
use crate::sensors::W1ThermSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<R, P> {
    sensor: W1ThermSensor,
    relay: RelayDriver<R>,
    fan: FanDriver<P>,
}

impl<R: OutputPin, P: SetDutyCycle> HardwareAdapter<R, P> {
    pub fn new(sensor: W1ThermSensor, relay: RelayDriver<R>, fan: FanDriver<P>) -> Self {
        Self { sensor, relay, fan }
    }

    /// Discover the probe under `devices_dir` and take ownership of both
    /// actuator outputs, driving them to the de-energised state.
    pub fn bind(devices_dir: impl AsRef<Path>, relay_pin: R, fan_pwm: P) -> Result<Self> {
        let sensor = W1ThermSensor::discover(devices_dir)?;
        let relay = RelayDriver::new(relay_pin)?;
        let fan = FanDriver::new(fan_pwm)?;
        Ok(Self::new(sensor, relay, fan))
    }

    pub fn sensor(&self) -> &W1ThermSensor {
        &self.sensor
    }

    pub fn relay(&self) -> &RelayDriver<R> {
        &self.relay
    }

    pub fn fan(&self) -> &FanDriver<P> {
        &self.fan
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<R: OutputPin, P: SetDutyCycle> SensorPort for HardwareAdapter<R, P> {
    fn read_temperature(&mut self) -> core::result::Result<f64, SensorError> {
        self.sensor.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<R: OutputPin, P: SetDutyCycle> ActuatorPort for HardwareAdapter<R, P> {
    fn set_relay(&mut self, engaged: bool) -> core::result::Result<(), ActuatorError> {
        self.relay.set(engaged)
    }

    fn set_duty_cycle(&mut self, duty: u8) -> core::result::Result<(), ActuatorError> {
        self.fan.set_duty(duty)
    }
}
