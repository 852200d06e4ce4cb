//! Telemetry Record Model
//!
//! Defines the ESC measurement record emitted once per datagram, and the
//! test configuration tag carried in every record.

mod config;
mod record;

pub use config::TestConfiguration;
pub use record::{MeasurementRecord, Measurements, Params, TimeReading, UnitsOfMeasure};

/// Vehicle identifier stamped on every record
pub const VEHICLE_ID: &str = "d126";

/// Measurement labels, in wire order
pub const LABELS: [&str; 6] = ["time", "rpm", "power", "voltage", "temp", "current"];

/// Number of simulated ESC channels cycled by the run controller
pub const CHANNEL_COUNT: u8 = 4;
