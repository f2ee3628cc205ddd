//! HTTP temperature reporter.
//!
//! Implements [`ReportPort`] by POSTing `{"value": <celsius>}` to the
//! configured endpoint.  Every dispatch runs on its own short-lived thread
//! so a slow or dead endpoint never stalls sampling.
//!
//! ## Delivery semantics
//!
//! - At most once: no retry, no backoff, no queue.
//! - Only HTTP 200 counts as delivered; other statuses and transport
//!   failures are logged and dropped.
//! - Reports may overlap and arrive out of order; each request is bounded
//!   by the configured timeout.
//! - Unbounded by default.  With `max_in_flight_reports = Some(n)` a
//!   dispatch that finds `n` requests running is dropped instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::app::ports::ReportPort;
use crate::app::reading::Reading;
use crate::config::SystemConfig;
use crate::error::{DeliveryError, Error, Result};

const IDLE_POLL: Duration = Duration::from_millis(20);

pub struct HttpReporter {
    client: Client,
    endpoint: String,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Option<usize>,
    dropped: u64,
}

impl HttpReporter {
    pub fn new(config: &SystemConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                warn!("HTTP client build failed: {}", e);
                Error::Init("HTTP client")
            })?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: config.max_in_flight_reports,
            dropped: 0,
        })
    }

    /// Post one reading and wait for the outcome.  Used by the dispatch
    /// threads; callable directly where blocking is acceptable.
    pub fn deliver(&self, reading: &Reading) -> core::result::Result<(), DeliveryError> {
        post_reading(&self.client, &self.endpoint, reading)
    }

    /// Reports currently waiting on the network.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Readings discarded because the in-flight bound was reached.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Block until no report is in flight or `timeout` elapses.
    /// Returns `true` if everything finished.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.in_flight() == 0 {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(IDLE_POLL.min(deadline - now));
        }
    }
}

impl ReportPort for HttpReporter {
    fn dispatch(&mut self, reading: Reading) {
        if let Some(max) = self.max_in_flight {
            if self.in_flight() >= max {
                self.dropped += 1;
                warn!(
                    "Report of {:.2}\u{00b0}C dropped: {} already in flight",
                    reading.celsius, max
                );
                return;
            }
        }

        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        let spawned = thread::Builder::new()
            .name("report".into())
            .spawn(move || {
                let _guard = guard;
                match post_reading(&client, &endpoint, &reading) {
                    Ok(()) => info!(
                        "Sent value={:.3} (sampled {})",
                        reading.celsius,
                        reading.taken_at.format("%H:%M:%S")
                    ),
                    Err(e) => warn!("Report of {:.3}\u{00b0}C failed: {}", reading.celsius, e),
                }
            });

        // On failure the closure, and with it the guard, is already dropped.
        if let Err(e) = spawned {
            warn!("Report thread spawn failed: {}", e);
        }
    }
}

/// Decrements the in-flight counter when the report thread ends, however
/// it ends.
struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

fn post_reading(
    client: &Client,
    endpoint: &str,
    reading: &Reading,
) -> core::result::Result<(), DeliveryError> {
    let resp = client.post(endpoint).json(&reading.payload()).send()?;
    let status = resp.status();
    if status == StatusCode::OK {
        return Ok(());
    }
    let body = resp.text().unwrap_or_default();
    Err(DeliveryError::Status {
        code: status.as_u16(),
        body,
    })
}
