//! Fan speed transfer function.
//!
//! Maps temperature overshoot above the target to a PWM duty cycle:
//!
//! ```text
//!   diff  = current - target
//!   speed = min(10 + 10·diff + 3·diff^1.8, 100), floored at 10, truncated
//! ```
//!
//! Any overshoot yields at least [`MIN_ACTIVE_DUTY`] so the fan is always
//! audibly spinning once it is on.  All arithmetic is `f64`.

/// Lowest duty cycle used while the relay is engaged.
pub const MIN_ACTIVE_DUTY: u8 = 10;
/// Full speed.
pub const MAX_DUTY: u8 = 100;

const BASE: f64 = MIN_ACTIVE_DUTY as f64;
const LINEAR_GAIN: f64 = 10.0;
const CURVE_EXPONENT: f64 = 1.8;
const CURVE_GAIN: f64 = 3.0;

/// Duty cycle (0–100) for `current_temp` against `target_temp`.
///
/// Returns 0 when `current_temp <= target_temp`.  A NaN reading fails that
/// comparison and `f64::min` then saturates it to [`MAX_DUTY`].
pub fn fan_speed(current_temp: f64, target_temp: f64) -> u8 {
    if current_temp <= target_temp {
        return 0;
    }

    let diff = current_temp - target_temp;
    let mut speed = (BASE + diff * LINEAR_GAIN + diff.powf(CURVE_EXPONENT) * CURVE_GAIN)
        .min(f64::from(MAX_DUTY));

    // Unreachable for finite positive diff; kept so the lower bound holds
    // independently of the curve's shape.
    if speed < BASE {
        speed = BASE;
    }

    speed as u8
}
