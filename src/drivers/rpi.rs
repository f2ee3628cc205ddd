//! Raspberry Pi pin wrappers.
//!
//! Adapts `rppal` GPIO outputs to the `embedded-hal` 1.0 traits the relay
//! and fan drivers are written against.  The fan uses rppal's software
//! PWM, so any GPIO can carry it.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType as DigitalErrorType, OutputPin};
use embedded_hal::pwm::{self, ErrorKind, ErrorType as PwmErrorType, SetDutyCycle};
use rppal::gpio;

/// Duty resolution exposed to `embedded-hal`; rppal takes an `f64` ratio.
const PWM_STEPS: u16 = 1000;

// ───────────────────────────────────────────────────────────────
// Digital output
// ───────────────────────────────────────────────────────────────

pub struct RpiOutput {
    pin: gpio::OutputPin,
}

impl RpiOutput {
    pub fn new(pin: gpio::OutputPin) -> Self {
        Self { pin }
    }
}

impl DigitalErrorType for RpiOutput {
    type Error = Infallible;
}

impl OutputPin for RpiOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Software PWM
// ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RpiPwmError(gpio::Error);

impl fmt::Display for RpiPwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "software PWM: {}", self.0)
    }
}

impl pwm::Error for RpiPwmError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct RpiSoftPwm {
    pin: gpio::OutputPin,
    frequency_hz: f64,
}

impl RpiSoftPwm {
    pub fn new(pin: gpio::OutputPin, frequency_hz: f64) -> Self {
        Self { pin, frequency_hz }
    }
}

impl PwmErrorType for RpiSoftPwm {
    type Error = RpiPwmError;
}

impl SetDutyCycle for RpiSoftPwm {
    fn max_duty_cycle(&self) -> u16 {
        PWM_STEPS
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty == 0 {
            // Stop the PWM thread and park the line low.
            self.pin.clear_pwm().map_err(RpiPwmError)?;
            self.pin.set_low();
            return Ok(());
        }
        let ratio = f64::from(duty.min(PWM_STEPS)) / f64::from(PWM_STEPS);
        self.pin
            .set_pwm_frequency(self.frequency_hz, ratio)
            .map_err(RpiPwmError)
    }
}
