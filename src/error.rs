//! Unified error types for the fan controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! harness's error handling uniform.  Sensor and actuator variants are `Copy`
//! so the control loop can pass them into events without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The temperature probe could not be read.
    Sensor(SensorError),
    /// A relay or PWM write failed.
    Actuator(ActuatorError),
    /// Peripheral or client initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Failures reading the 1-Wire temperature probe.  All of them are expected
/// on this class of hardware and recovered by skipping the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// CRC check failed or the conversion has not completed yet.
    NotReady,
    /// The device file vanished (probe unplugged or bus reset).
    Disconnected,
    /// No DS18B20 was found on the 1-Wire bus at startup.
    NoSensorFound,
    /// The probe returned its power-on reset value (85 °C).
    ResetValue,
    /// The device file did not contain a parsable temperature.
    Malformed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "sensor not ready"),
            Self::Disconnected => write!(f, "sensor disconnected"),
            Self::NoSensorFound => write!(f, "no sensor found on 1-Wire bus"),
            Self::ResetValue => write!(f, "sensor returned power-on reset value"),
            Self::Malformed => write!(f, "malformed sensor data"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO write to the relay pin failed.
    RelayWriteFailed,
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelayWriteFailed => write!(f, "relay write failed"),
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Delivery errors
// ---------------------------------------------------------------------------

/// Outcome of a single failed report attempt.  Reports are at-most-once, so
/// these are logged and dropped inside the report thread, never retried
/// and never lifted into [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The endpoint answered with something other than 200.
    Status { code: u16, body: String },
    /// No response within the request timeout.
    Timeout,
    /// Connection refused, DNS failure or unreachable host.
    Connect(String),
    /// Any other transport-level failure.
    Transport(String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code, body } => write!(f, "HTTP {code}: {body}"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect(msg) => write!(f, "connect failed: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for DeliveryError {}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
