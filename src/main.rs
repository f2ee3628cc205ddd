//! Thermofan — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          HttpReporter        LogEventSink     │
//! │  (Sensor+Actuator)        (ReportPort)        (EventSink)      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  fan curve · relay state                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{info, warn};
use rppal::gpio::Gpio;
use tracing_subscriber::EnvFilter;

use thermofan::adapters::hardware::HardwareAdapter;
use thermofan::adapters::http_reporter::HttpReporter;
use thermofan::adapters::log_sink::LogEventSink;
use thermofan::app::controller::Controller;
use thermofan::config::SystemConfig;
use thermofan::drivers::rpi::{RpiOutput, RpiSoftPwm};
use thermofan::pins;
use thermofan::shutdown::ShutdownSignal;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("thermofan v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!(
        "target={:.1}\u{00b0}C interval={:.1}s endpoint={} timeout={:.1}s",
        config.target_temperature_c,
        config.probe_interval_secs,
        config.api_endpoint,
        config.request_timeout_secs
    );

    // ── 3. Signals ────────────────────────────────────────────
    let signal = ShutdownSignal::new();
    {
        let signal = signal.clone();
        ctrlc::set_handler(move || signal.trigger()).context("installing signal handler")?;
    }

    // ── 4. Peripherals ────────────────────────────────────────
    let gpio = Gpio::new().context("opening GPIO")?;
    let relay_pin = gpio
        .get(pins::RELAY_GPIO)
        .context("claiming relay pin")?
        .into_output_low();
    let fan_pin = gpio
        .get(pins::FAN_PWM_GPIO)
        .context("claiming fan PWM pin")?
        .into_output_low();

    let mut hw = HardwareAdapter::bind(
        pins::W1_DEVICES_DIR,
        RpiOutput::new(relay_pin),
        RpiSoftPwm::new(fan_pin, pins::FAN_PWM_FREQUENCY_HZ),
    )
    .context("binding probe and actuators")?;
    info!("Probe {}", hw.sensor().id());

    // ── 5. Reporter + controller ──────────────────────────────
    let mut reporter = HttpReporter::new(&config)?;
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(&config);

    controller.start(&mut sink);
    controller.run(&mut hw, &mut reporter, &mut sink, &signal);

    // ── 6. Safe state ─────────────────────────────────────────
    if let Err(e) = controller.shutdown(&mut hw, &mut sink) {
        warn!("Actuator shutdown incomplete: {}", e);
    }

    let pending = reporter.in_flight();
    if pending > 0 {
        info!("Waiting for {} in-flight report(s)", pending);
        if !reporter.wait_idle(config.request_timeout()) {
            warn!("{} report(s) still in flight at exit", reporter.in_flight());
        }
    }

    info!("Shutdown complete");
    Ok(())
}
