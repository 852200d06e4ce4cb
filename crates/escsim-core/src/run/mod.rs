//! Run Control
//!
//! Settings, counters and the controller that drives one simulator run.
//!
//! A run moves through [`RunPhase::Initializing`], [`RunPhase::Running`],
//! [`RunPhase::Stopping`] and [`RunPhase::Terminated`]. Only one run exists
//! per controller.

mod config;
mod controller;
mod state;

pub use config::{
    RunConfig, Variant, DEFAULT_DELAY_SECS, DEFAULT_POWER, MAX_POWER, MIN_POWER,
};
pub use controller::RunController;
pub use state::RunState;

use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// Settings validated, nothing sent yet
    Initializing,
    /// Emitting records
    Running,
    /// Releasing the sink
    Stopping,
    /// Finished; the controller cannot run again
    Terminated,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The configured timeout elapsed
    Deadline,
    /// The cancellation token fired
    Cancelled,
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Run identifier stamped on every record
    pub run_id: f64,
    /// Records handed to the sink
    pub emitted: u64,
    /// Wall-clock run time
    pub elapsed: Duration,
    /// Why the run ended
    pub stop_reason: StopReason,
}

/// Run identifier: seconds since the Unix epoch, with sub-second precision
pub fn current_run_id() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
