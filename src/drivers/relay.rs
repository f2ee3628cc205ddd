//! Fan power relay driver.
//!
//! Generic over any [`embedded_hal::digital::OutputPin`]; the relay coil
//! is energised by driving the pin HIGH.  The driver remembers the last
//! level it successfully wrote and never assumes a failed write landed.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Released,
    Engaged,
}

pub struct RelayDriver<P> {
    pin: P,
    state: RelayState,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive it LOW so the relay starts
    /// released.
    pub fn new(pin: P) -> Result<Self, ActuatorError> {
        let mut driver = Self {
            pin,
            state: RelayState::Released,
        };
        driver.release()?;
        Ok(driver)
    }

    pub fn engage(&mut self) -> Result<(), ActuatorError> {
        self.pin.set_high().map_err(|e| {
            warn!("relay pin set_high: {:?}", e);
            ActuatorError::RelayWriteFailed
        })?;
        self.state = RelayState::Engaged;
        Ok(())
    }

    pub fn release(&mut self) -> Result<(), ActuatorError> {
        self.pin.set_low().map_err(|e| {
            warn!("relay pin set_low: {:?}", e);
            ActuatorError::RelayWriteFailed
        })?;
        self.state = RelayState::Released;
        Ok(())
    }

    pub fn set(&mut self, engaged: bool) -> Result<(), ActuatorError> {
        if engaged { self.engage() } else { self.release() }
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_engaged(&self) -> bool {
        self.state == RelayState::Engaged
    }
}
