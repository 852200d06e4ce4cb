//! Simulator errors

use thiserror::Error;

use crate::transport::TransportError;

/// Errors detected while validating run settings, before any emission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fixed power outside the accepted range
    #[error("Power {0}% out of range [10-100]")]
    PowerOutOfRange(u8),

    /// A step power outside the accepted range
    #[error("Step {index} has power {value}% out of range [10-100]")]
    StepOutOfRange {
        /// Position in the step list
        index: usize,
        /// Offending power
        value: u8,
    },

    /// Test configuration id other than 1-4
    #[error("Invalid test configuration id {0} (expected 1: single, 2: cross_02, 3: cross_13, 4: all_4)")]
    InvalidTestConfiguration(u8),

    /// Delay not a positive, representable number of seconds
    #[error("Delay must be a positive number of seconds, got {0}")]
    InvalidDelay(f64),

    /// Timeout negative, not finite, or too large
    #[error("Timeout must be zero or a positive number of seconds, got {0}")]
    InvalidTimeout(f64),

    /// Step list given to the continuous variant
    #[error("Step powers are only supported by the sweep variant")]
    StepsRequireSweep,
}

/// Errors raised by the run controller
#[derive(Error, Debug)]
pub enum RunError {
    /// Settings failed validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Transport could not be opened
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// `run` called on a controller that already ran
    #[error("Run already finished; create a new controller for another run")]
    AlreadyTerminated,
}
