//! GPIO / peripheral pin assignments for the controller board.
//!
//! Pins are claimed once in `main` and handed to the drivers.
//! BCM numbering.

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

/// Digital output driving the fan power relay (active HIGH).
pub const RELAY_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// Fan
// ---------------------------------------------------------------------------

/// Software-PWM output to the fan's speed input.
pub const FAN_PWM_GPIO: u8 = 19;
/// Fan PWM carrier frequency.
pub const FAN_PWM_FREQUENCY_HZ: f64 = 100.0;

// ---------------------------------------------------------------------------
// Temperature probe
// ---------------------------------------------------------------------------

/// Linux sysfs directory listing 1-Wire slaves (w1-gpio overlay on GPIO 4).
pub const W1_DEVICES_DIR: &str = "/sys/bus/w1/devices";
