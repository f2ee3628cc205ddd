//! DS18B20-family 1-Wire temperature probe via the Linux w1 sysfs.
//!
//! The kernel's `w1_therm` driver exposes each probe as
//! `<devices>/<family>-<serial>/w1_slave`.  Reading the file triggers a
//! conversion (~750 ms at 12-bit resolution) and yields two lines:
//!
//! ```text
//! 72 01 4b 46 7f ff 0e 10 57 : crc=57 YES
//! 72 01 4b 46 7f ff 0e 10 57 t=23125
//! ```
//!
//! The first line ends in `YES` when the CRC matched; the second carries
//! the temperature in millidegrees Celsius.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::SensorError;

/// 1-Wire family codes handled by `w1_therm` that report temperature in
/// the same format: DS18S20, DS1822, DS18B20, MAX31850, DS28EA00.
const THERM_FAMILIES: [&str; 5] = ["10", "22", "28", "3b", "42"];

const SLAVE_FILE: &str = "w1_slave";

/// Power-on reset register value (85 °C), reported when a conversion was
/// interrupted by a brown-out.
const RESET_VALUE_MILLI: i64 = 85_000;

pub struct W1ThermSensor {
    id: String,
    slave_path: PathBuf,
}

impl W1ThermSensor {
    /// Bind to the probe with the given sysfs id, e.g. `28-00000a1b2c3d`.
    pub fn new(devices_dir: impl AsRef<Path>, id: &str) -> Self {
        Self {
            id: id.to_string(),
            slave_path: devices_dir.as_ref().join(id).join(SLAVE_FILE),
        }
    }

    /// Bind to the first temperature probe found under `devices_dir`.
    ///
    /// Ids are sorted so the choice is stable across reboots.
    pub fn discover(devices_dir: impl AsRef<Path>) -> Result<Self, SensorError> {
        let devices_dir = devices_dir.as_ref();
        let entries = fs::read_dir(devices_dir).map_err(|_| SensorError::NoSensorFound)?;

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_therm_device(name))
            .collect();
        ids.sort();

        let id = ids.into_iter().next().ok_or(SensorError::NoSensorFound)?;
        info!("1-Wire probe {} under {}", id, devices_dir.display());
        Ok(Self::new(devices_dir, &id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Trigger a conversion and return degrees Celsius.
    pub fn read(&self) -> Result<f64, SensorError> {
        let raw = fs::read_to_string(&self.slave_path).map_err(|e| {
            debug!("{}: {}", self.slave_path.display(), e);
            match e.kind() {
                io::ErrorKind::InvalidData => SensorError::Malformed,
                _ => SensorError::Disconnected,
            }
        })?;
        parse_w1_slave(&raw)
    }
}

fn is_therm_device(name: &str) -> bool {
    name.split_once('-')
        .is_some_and(|(family, serial)| {
            THERM_FAMILIES.contains(&family.to_ascii_lowercase().as_str()) && !serial.is_empty()
        })
}

/// Parse the contents of a `w1_slave` file into degrees Celsius.
pub fn parse_w1_slave(raw: &str) -> Result<f64, SensorError> {
    let mut lines = raw.lines();

    let crc_line = lines.next().ok_or(SensorError::NotReady)?;
    if !crc_line.trim_end().ends_with("YES") {
        return Err(SensorError::NotReady);
    }

    let data_line = lines.next().ok_or(SensorError::Malformed)?;
    let (_, milli) = data_line
        .rsplit_once("t=")
        .ok_or(SensorError::Malformed)?;
    let milli: i64 = milli.trim().parse().map_err(|_| SensorError::Malformed)?;

    if milli == RESET_VALUE_MILLI {
        return Err(SensorError::ResetValue);
    }

    Ok(milli as f64 / 1000.0)
}
