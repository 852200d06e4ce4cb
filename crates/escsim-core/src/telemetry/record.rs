//! Measurement record
//!
//! One record is encoded per datagram. Field names and nesting are part of
//! the wire format consumed by the telemetry dashboard:
//!
//! ```text
//! { "vehicle", "testid", "escid",
//!   "params": { "power", "config", "step" },
//!   "measurements": { "time", "rpm", "power", "voltage", "temp", "current" },
//!   "labels": [...], "uom": {...} }
//! ```

use serde::{Deserialize, Serialize};

use super::{TestConfiguration, LABELS, VEHICLE_ID};

/// A single synthetic ESC reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Vehicle identifier (always [`VEHICLE_ID`])
    pub vehicle: String,
    /// Run identifier, constant for the whole run
    pub testid: f64,
    /// ESC channel (0-3)
    pub escid: u8,
    /// Requested test parameters
    pub params: Params,
    /// Sensor readings
    pub measurements: Measurements,
    /// Measurement labels in display order
    pub labels: Vec<String>,
    /// Unit of measure per label
    pub uom: UnitsOfMeasure,
}

impl MeasurementRecord {
    /// Build a record, filling in the fixed vehicle, labels and units
    pub fn new(testid: f64, escid: u8, params: Params, measurements: Measurements) -> Self {
        Self {
            vehicle: VEHICLE_ID.to_string(),
            testid,
            escid,
            params,
            measurements,
            labels: LABELS.iter().map(|l| l.to_string()).collect(),
            uom: UnitsOfMeasure::default(),
        }
    }
}

/// Parameters the run requested for this record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Requested ESC power (%)
    pub power: u8,
    /// Test configuration tag
    pub config: TestConfiguration,
    /// Set to the requested power when it came from a step list, `null` otherwise
    pub step: Option<u8>,
}

/// Logical time of a reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeReading {
    /// Integer tick index (sweep variant)
    Tick(u64),
    /// Wall-clock seconds since run start (continuous variant)
    Elapsed(f64),
}

impl TimeReading {
    /// The reading as seconds / ticks in floating point
    pub fn as_f64(self) -> f64 {
        match self {
            TimeReading::Tick(tick) => tick as f64,
            TimeReading::Elapsed(secs) => secs,
        }
    }
}

/// Randomized sensor readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    /// Logical time
    pub time: TimeReading,
    /// Motor speed (rpm)
    pub rpm: u16,
    /// Reported power (%), sampled independently of the requested power
    pub power: u8,
    /// Bus voltage (V)
    pub voltage: f64,
    /// ESC temperature (°C)
    pub temp: f64,
    /// Current draw (A)
    pub current: f64,
}

/// Unit of measure for each label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsOfMeasure {
    /// Unit of `time`
    pub time: String,
    /// Unit of `rpm`
    pub rpm: String,
    /// Unit of `power`
    pub power: String,
    /// Unit of `voltage`
    pub voltage: String,
    /// Unit of `temp`
    pub temp: String,
    /// Unit of `current`
    pub current: String,
}

impl UnitsOfMeasure {
    /// Look up the unit for a label
    pub fn get(&self, label: &str) -> Option<&str> {
        match label {
            "time" => Some(&self.time),
            "rpm" => Some(&self.rpm),
            "power" => Some(&self.power),
            "voltage" => Some(&self.voltage),
            "temp" => Some(&self.temp),
            "current" => Some(&self.current),
            _ => None,
        }
    }
}

impl Default for UnitsOfMeasure {
    fn default() -> Self {
        Self {
            time: "sec".to_string(),
            rpm: "rpm".to_string(),
            power: "%".to_string(),
            voltage: "V".to_string(),
            temp: "°C".to_string(),
            current: "Amps".to_string(),
        }
    }
}
