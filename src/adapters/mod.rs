//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements    | Connects to                  |
//! |-----------------|---------------|------------------------------|
//! | `hardware`      | SensorPort    | 1-Wire probe (w1 sysfs)      |
//! |                 | ActuatorPort  | relay GPIO, fan PWM          |
//! | `http_reporter` | ReportPort    | telemetry API over HTTP      |
//! | `log_sink`      | EventSink     | `log` facade                 |

pub mod hardware;
pub mod http_reporter;
pub mod log_sink;
