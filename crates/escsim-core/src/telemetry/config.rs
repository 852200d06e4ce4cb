//! Test configuration tag

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ConfigError;

/// Motor test configuration under which a run is performed.
///
/// The value is informational metadata echoed in every record. It does not
/// change how many channels the run controller cycles through: every
/// configuration cycles all four ESC channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TestConfiguration {
    /// One motor under test
    Single = 1,
    /// Motors 0 and 2 (cross pair)
    Cross02 = 2,
    /// Motors 1 and 3 (cross pair)
    Cross13 = 3,
    /// All four motors
    #[default]
    All4 = 4,
}

impl TestConfiguration {
    /// All configurations in id order
    pub const ALL: [TestConfiguration; 4] = [
        TestConfiguration::Single,
        TestConfiguration::Cross02,
        TestConfiguration::Cross13,
        TestConfiguration::All4,
    ];

    /// Numeric id used on the wire and on the command line
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Number of motors the configuration nominally involves.
    ///
    /// Reported for display only; channel cycling ignores it.
    pub fn channel_count(self) -> u8 {
        match self {
            TestConfiguration::Single => 1,
            TestConfiguration::Cross02 | TestConfiguration::Cross13 => 2,
            TestConfiguration::All4 => 4,
        }
    }

    /// Lowercase name as used in help text
    pub fn name(self) -> &'static str {
        match self {
            TestConfiguration::Single => "single",
            TestConfiguration::Cross02 => "cross_02",
            TestConfiguration::Cross13 => "cross_13",
            TestConfiguration::All4 => "all_4",
        }
    }
}

impl TryFrom<u8> for TestConfiguration {
    type Error = ConfigError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(TestConfiguration::Single),
            2 => Ok(TestConfiguration::Cross02),
            3 => Ok(TestConfiguration::Cross13),
            4 => Ok(TestConfiguration::All4),
            other => Err(ConfigError::InvalidTestConfiguration(other)),
        }
    }
}

impl From<TestConfiguration> for u8 {
    fn from(config: TestConfiguration) -> Self {
        config.id()
    }
}

impl fmt::Display for TestConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}
