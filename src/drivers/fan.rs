//! PWM fan speed driver.
//!
//! Generic over any [`embedded_hal::pwm::SetDutyCycle`] channel; duty is
//! expressed in percent and scaled to the channel's resolution by
//! `embedded-hal`.

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::control::fan_curve::MAX_DUTY;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanDriveState {
    Stopped,
    Running { duty: u8 },
}

pub struct FanDriver<P> {
    pwm: P,
    hw_duty: u8,
}

impl<P: SetDutyCycle> FanDriver<P> {
    /// Take ownership of `pwm` and stop the fan.
    pub fn new(pwm: P) -> Result<Self, ActuatorError> {
        let mut driver = Self { pwm, hw_duty: 0 };
        driver.stop()?;
        Ok(driver)
    }

    /// Set duty in percent; values above 100 are clamped.
    pub fn set_duty(&mut self, duty: u8) -> Result<(), ActuatorError> {
        let duty = duty.min(MAX_DUTY);
        self.pwm.set_duty_cycle_percent(duty).map_err(|e| {
            warn!("fan PWM write ({}%): {:?}", duty, e);
            ActuatorError::PwmWriteFailed
        })?;
        self.hw_duty = duty;
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set_duty(0)
    }

    pub fn state(&self) -> FanDriveState {
        match self.hw_duty {
            0 => FanDriveState::Stopped,
            duty => FanDriveState::Running { duty },
        }
    }

    pub fn current_duty(&self) -> u8 {
        self.hw_duty
    }
}
