//! Integration tests: HardwareAdapter over a fake w1 sysfs tree and
//! in-memory embedded-hal pins.

use std::convert::Infallible;
use std::fs;
use std::path::Path;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use tempfile::TempDir;

use thermofan::adapters::hardware::HardwareAdapter;
use thermofan::app::controller::{Controller, FanState};
use thermofan::app::ports::{ActuatorPort, SensorPort};
use thermofan::config::SystemConfig;
use thermofan::drivers::{FanDriver, RelayDriver};
use thermofan::error::{ActuatorError, Error, SensorError};
use thermofan::sensors::W1ThermSensor;

use crate::mock_hw::{RecordingReporter, RecordingSink};

const PROBE_ID: &str = "28-00000a1b2c3d";

#[derive(Default)]
struct MemPin {
    high: bool,
}

impl PinErrorType for MemPin {
    type Error = Infallible;
}

impl OutputPin for MemPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

#[derive(Default)]
struct MemPwm {
    duty: u16,
}

impl PwmErrorType for MemPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MemPwm {
    fn max_duty_cycle(&self) -> u16 {
        1000
    }
    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty;
        Ok(())
    }
}

fn write_slave(dir: &Path, id: &str, contents: &str) {
    let device = dir.join(id);
    fs::create_dir_all(&device).unwrap();
    fs::write(device.join("w1_slave"), contents).unwrap();
}

fn slave_file(milli: i64) -> String {
    format!(
        "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n72 01 4b 46 7f ff 0e 10 57 t={}\n",
        milli
    )
}

/// Relay output whose driver has been unplugged.
struct DeadPin;

#[derive(Debug)]
struct PinFault;

impl embedded_hal::digital::Error for PinFault {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl PinErrorType for DeadPin {
    type Error = PinFault;
}

impl OutputPin for DeadPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(PinFault)
    }
}

fn adapter(dir: &Path) -> HardwareAdapter<MemPin, MemPwm> {
    HardwareAdapter::bind(dir, MemPin::default(), MemPwm::default()).unwrap()
}

// ── Sensor ────────────────────────────────────────────────────

#[test]
fn discovers_and_reads_probe() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("w1_bus_master1")).unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(23_125));

    let sensor = W1ThermSensor::discover(dir.path()).unwrap();
    assert_eq!(sensor.id(), PROBE_ID);
    assert!((sensor.read().unwrap() - 23.125).abs() < 1e-9);
}

#[test]
fn discovery_picks_lowest_id() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), "28-ffff", &slave_file(20_000));
    write_slave(dir.path(), "28-0001", &slave_file(21_000));

    let sensor = W1ThermSensor::discover(dir.path()).unwrap();
    assert_eq!(sensor.id(), "28-0001");
}

#[test]
fn empty_bus_has_no_sensor() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("w1_bus_master1")).unwrap();

    assert!(matches!(
        W1ThermSensor::discover(dir.path()),
        Err(SensorError::NoSensorFound)
    ));
    assert!(matches!(
        W1ThermSensor::discover(dir.path().join("missing")),
        Err(SensorError::NoSensorFound)
    ));
}

#[test]
fn crc_mismatch_is_not_ready() {
    let dir = TempDir::new().unwrap();
    write_slave(
        dir.path(),
        PROBE_ID,
        "72 01 4b 46 7f ff 0e 10 57 : crc=00 NO\n72 01 4b 46 7f ff 0e 10 57 t=23125\n",
    );

    let mut hw = adapter(dir.path());
    assert_eq!(hw.read_temperature(), Err(SensorError::NotReady));
}

#[test]
fn unplugged_probe_is_disconnected() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(23_125));
    let mut hw = adapter(dir.path());

    fs::remove_dir_all(dir.path().join(PROBE_ID)).unwrap();
    assert_eq!(hw.read_temperature(), Err(SensorError::Disconnected));
}

#[test]
fn power_on_reset_value_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(85_000));

    let mut hw = adapter(dir.path());
    assert_eq!(hw.read_temperature(), Err(SensorError::ResetValue));
}

// ── Bring-up ──────────────────────────────────────────────────

#[test]
fn bind_without_probe_is_a_sensor_error() {
    let dir = TempDir::new().unwrap();

    let result = HardwareAdapter::bind(dir.path(), MemPin::default(), MemPwm::default());
    assert!(matches!(
        result,
        Err(Error::Sensor(SensorError::NoSensorFound))
    ));
}

#[test]
fn bind_with_dead_relay_is_an_actuator_error() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(22_000));

    let result = HardwareAdapter::bind(dir.path(), DeadPin, MemPwm::default());
    assert!(matches!(
        result,
        Err(Error::Actuator(ActuatorError::RelayWriteFailed))
    ));
}

#[test]
fn new_matches_bind() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(22_000));

    let sensor = W1ThermSensor::discover(dir.path()).unwrap();
    let relay = RelayDriver::new(MemPin::default()).unwrap();
    let fan = FanDriver::new(MemPwm::default()).unwrap();
    let hw = HardwareAdapter::new(sensor, relay, fan);

    assert_eq!(hw.sensor().id(), adapter(dir.path()).sensor().id());
    assert!(!hw.relay().is_engaged());
}

// ── Actuators ─────────────────────────────────────────────────

#[test]
fn actuator_port_drives_pins() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(22_000));
    let mut hw = adapter(dir.path());

    assert!(!hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 0);

    hw.set_relay(true).unwrap();
    hw.set_duty_cycle(55).unwrap();
    assert!(hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 55);

    hw.set_duty_cycle(0).unwrap();
    hw.set_relay(false).unwrap();
    assert!(!hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 0);
}

// ── Full loop ─────────────────────────────────────────────────

#[test]
fn controller_drives_real_adapter() {
    let dir = TempDir::new().unwrap();
    write_slave(dir.path(), PROBE_ID, &slave_file(23_000));
    let mut hw = adapter(dir.path());
    let mut controller = Controller::new(&SystemConfig::default());
    let mut reporter = RecordingReporter::default();
    let mut sink = RecordingSink::default();

    controller.tick(&mut hw, &mut reporter, &mut sink);
    assert_eq!(controller.state(), FanState::Active { duty: 23 });
    assert!(hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 23);

    write_slave(dir.path(), PROBE_ID, &slave_file(21_500));
    controller.tick(&mut hw, &mut reporter, &mut sink);
    assert_eq!(controller.state(), FanState::IdleOff);
    assert!(!hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 0);

    write_slave(dir.path(), PROBE_ID, &slave_file(30_000));
    controller.tick(&mut hw, &mut reporter, &mut sink);
    assert_eq!(hw.fan().current_duty(), 100);

    controller.shutdown(&mut hw, &mut sink).unwrap();
    assert!(!hw.relay().is_engaged());
    assert_eq!(hw.fan().current_duty(), 0);
    assert_eq!(reporter.sent.len(), 3);
}
