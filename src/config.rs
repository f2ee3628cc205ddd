//! System configuration parameters
//!
//! All tunable parameters for the fan controller.  Fixed at process start
//! and never re-read; the controller and reporter copy what they need.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default report endpoint: the telemetry API on the same host.
pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:5000/api/temp/insert";

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Control ---
    /// Temperature (Celsius) at or below which the fan stays off
    pub target_temperature_c: f64,

    // --- Timing ---
    /// Delay between probe samples (seconds)
    pub probe_interval_secs: f64,

    // --- Reporting ---
    /// URL that receives `{"value": <celsius>}` POSTs
    pub api_endpoint: String,
    /// Upper bound on a single report request (seconds)
    pub request_timeout_secs: f64,
    /// Cap on concurrently running reports; `None` = unbounded
    pub max_in_flight_reports: Option<usize>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            target_temperature_c: 22.0,
            probe_interval_secs: 1.0,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            request_timeout_secs: 5.0,
            max_in_flight_reports: None,
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop or reporter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.target_temperature_c.is_finite() {
            return Err(Error::Config("target_temperature_c must be finite"));
        }
        if !(self.probe_interval_secs.is_finite() && self.probe_interval_secs > 0.0) {
            return Err(Error::Config("probe_interval_secs must be positive"));
        }
        if !(self.request_timeout_secs.is_finite() && self.request_timeout_secs > 0.0) {
            return Err(Error::Config("request_timeout_secs must be positive"));
        }
        if self.max_in_flight_reports == Some(0) {
            return Err(Error::Config("max_in_flight_reports must be at least 1"));
        }
        match reqwest::Url::parse(&self.api_endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(_) => Err(Error::Config("api_endpoint must be an http(s) URL")),
            Err(_) => Err(Error::Config("api_endpoint is not a valid URL")),
        }
    }

    /// Probe interval as a [`Duration`].  Falls back to 1 s for values
    /// [`validate`](Self::validate) would reject.
    pub fn probe_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.probe_interval_secs).unwrap_or(Duration::from_secs(1))
    }

    /// Request timeout as a [`Duration`].  Falls back to 5 s for values
    /// [`validate`](Self::validate) would reject.
    pub fn request_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.request_timeout_secs).unwrap_or(Duration::from_secs(5))
    }
}
