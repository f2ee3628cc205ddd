//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (stderr via the harness's subscriber in production).

use log::{debug, info, warn};

use crate::app::controller::FanState;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { target_c } => {
                info!("START | target={:.1}\u{00b0}C", target_c);
            }
            AppEvent::Telemetry(t) => {
                let fan = match t.state {
                    FanState::IdleOff => "off".to_string(),
                    FanState::Active { duty } => format!("{}%", duty),
                };
                debug!(
                    "TELEM | tick={} | T={:.2}\u{00b0}C target={:.1}\u{00b0}C | fan={}",
                    t.tick, t.temperature_c, t.target_c, fan,
                );
            }
            AppEvent::RelayChanged { engaged } => {
                info!("RELAY | {}", if *engaged { "ON" } else { "OFF" });
            }
            AppEvent::SensorFault { error, consecutive } => {
                warn!("SENSOR | {} (x{})", error, consecutive);
            }
            AppEvent::ActuatorFault(e) => {
                warn!("ACTUATOR | {}", e);
            }
            AppEvent::Stopped { ticks } => {
                info!("STOP | actuators off after {} ticks", ticks);
            }
        }
    }
}
