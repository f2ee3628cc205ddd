//! Actuator drivers.
//!
//! The relay and fan drivers are generic over `embedded-hal` traits and
//! build on the host; the Raspberry Pi pin wrappers need the `rpi` feature.

pub mod fan;
pub mod relay;
#[cfg(feature = "rpi")]
pub mod rpi;

pub use fan::FanDriver;
pub use relay::RelayDriver;
