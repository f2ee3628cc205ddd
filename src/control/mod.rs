//! Control laws mapping sensor readings to actuator commands.

pub mod fan_curve;
