//! Measurement Synthesizer - randomized ESC readings
//!
//! Produces one [`MeasurementRecord`] per call. Every sensor field is drawn
//! independently and uniformly over its range; there is no physical model
//! tying rpm, power and current together.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::telemetry::{MeasurementRecord, Measurements, Params, TestConfiguration, TimeReading};

/// Motor speed range (rpm)
pub const RPM_RANGE: (u16, u16) = (0, 5000);
/// Reported power range (%)
pub const POWER_RANGE: (u8, u8) = (10, 100);
/// Bus voltage range (V)
pub const VOLTAGE_RANGE: (f64, f64) = (0.1, 5.9);
/// ESC temperature range (°C)
pub const TEMP_RANGE: (f64, f64) = (35.0, 45.0);
/// Current draw range (A)
pub const CURRENT_RANGE: (f64, f64) = (-0.01, 0.1);

/// Inputs for a single synthesized record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRequest {
    /// Run identifier
    pub run_id: f64,
    /// Logical time of the reading
    pub time: TimeReading,
    /// ESC channel (0-3)
    pub channel: u8,
    /// Requested power (%)
    pub power: u8,
    /// Test configuration tag
    pub config: TestConfiguration,
    /// Step power when the power came from a step list
    pub step: Option<u8>,
}

/// Synthetic ESC sensor generator
pub struct MeasurementSynthesizer<R = StdRng> {
    rng: R,
}

impl Default for MeasurementSynthesizer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSynthesizer<StdRng> {
    /// Create a synthesizer seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic synthesizer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> MeasurementSynthesizer<R> {
    /// Create a synthesizer around an existing generator
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one record for the requested channel and power
    pub fn synthesize(&mut self, request: &SampleRequest) -> MeasurementRecord {
        let measurements = Measurements {
            time: request.time,
            rpm: self.rng.gen_range(RPM_RANGE.0..=RPM_RANGE.1),
            power: self.rng.gen_range(POWER_RANGE.0..=POWER_RANGE.1),
            voltage: self.rng.gen_range(VOLTAGE_RANGE.0..=VOLTAGE_RANGE.1),
            temp: self.rng.gen_range(TEMP_RANGE.0..=TEMP_RANGE.1),
            current: self.rng.gen_range(CURRENT_RANGE.0..=CURRENT_RANGE.1),
        };

        let params = Params {
            power: request.power,
            config: request.config,
            step: request.step,
        };

        MeasurementRecord::new(request.run_id, request.channel, params, measurements)
    }
}
