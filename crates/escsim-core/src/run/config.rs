//! Run settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;
use crate::power::PowerSource;
use crate::telemetry::TestConfiguration;
use crate::transport::{DEFAULT_ADDRESS, DEFAULT_PORT};

/// Lowest accepted power (%)
pub const MIN_POWER: u8 = 10;
/// Highest accepted power (%)
pub const MAX_POWER: u8 = 100;
/// Default fixed power (%)
pub const DEFAULT_POWER: u8 = 20;
/// Default pause between sends (seconds)
pub const DEFAULT_DELAY_SECS: f64 = 0.2;

/// Which emission loop flavour to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Fixed power, `time` is wall-clock seconds since start
    #[default]
    Continuous,
    /// Integer tick as `time`, optional step list overriding fixed power
    Sweep,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Continuous => write!(f, "continuous"),
            Variant::Sweep => write!(f, "sweep"),
        }
    }
}

/// Settings for one simulator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Destination address
    pub address: String,
    /// Destination port
    pub port: u16,
    /// Seconds to run; `None` runs until cancelled
    pub timeout: Option<f64>,
    /// Fixed power (%)
    pub power: u8,
    /// Test configuration id (1-4)
    pub config: u8,
    /// Step powers for the sweep variant
    pub steps: Option<Vec<u8>>,
    /// Pause between sends (seconds)
    pub delay: f64,
    /// Loop flavour
    pub variant: Variant,
    /// Log every outgoing payload
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
            power: DEFAULT_POWER,
            config: TestConfiguration::default().id(),
            steps: None,
            delay: DEFAULT_DELAY_SECS,
            variant: Variant::default(),
            verbose: false,
        }
    }
}

impl RunConfig {
    /// Check every setting before anything is opened or sent
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_POWER..=MAX_POWER).contains(&self.power) {
            return Err(ConfigError::PowerOutOfRange(self.power));
        }

        self.test_configuration()?;

        if self.delay <= 0.0 || Duration::try_from_secs_f64(self.delay).is_err() {
            return Err(ConfigError::InvalidDelay(self.delay));
        }

        if let Some(timeout) = self.timeout {
            // Rejects negative, NaN, infinite and too-large values
            if Duration::try_from_secs_f64(timeout).is_err() {
                return Err(ConfigError::InvalidTimeout(timeout));
            }
        }

        if let Some(steps) = &self.steps {
            if self.variant != Variant::Sweep && !steps.is_empty() {
                return Err(ConfigError::StepsRequireSweep);
            }
            if let Some((index, &value)) = steps
                .iter()
                .enumerate()
                .find(|(_, p)| !(MIN_POWER..=MAX_POWER).contains(*p))
            {
                return Err(ConfigError::StepOutOfRange { index, value });
            }
        }

        Ok(())
    }

    /// The test configuration tag for the configured id
    pub fn test_configuration(&self) -> Result<TestConfiguration, ConfigError> {
        TestConfiguration::try_from(self.config)
    }

    /// Pause between sends; saturates for settings `validate` rejects
    pub fn delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::MAX)
    }

    /// Run length, or `None` for an unbounded run
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .map(|t| Duration::try_from_secs_f64(t).unwrap_or(Duration::MAX))
    }

    /// Power source implied by the variant and step list
    pub fn power_source(&self) -> PowerSource {
        match self.variant {
            Variant::Continuous => PowerSource::Constant(self.power),
            Variant::Sweep => PowerSource::from_steps(self.power, self.steps.clone()),
        }
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeout = self
            .timeout
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".to_string());
        let steps = self
            .steps
            .as_ref()
            .map(|s| format!("{s:?}"))
            .unwrap_or_else(|| "none".to_string());

        write!(
            f,
            "address: {}, port: {}, timeout: {}, power: {}, config: {}, step: {}, delay: {}, variant: {}, is verbose: {}",
            self.address,
            self.port,
            timeout,
            self.power,
            self.config,
            steps,
            self.delay,
            self.variant,
            self.verbose
        )
    }
}
