//! Per-run counters

use std::time::Duration;

use crate::telemetry::CHANNEL_COUNT;

/// Mutable counters owned by the run controller for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Time since the run started, as of the last tick
    pub elapsed: Duration,
    /// Channel for the next emission (0-3)
    pub channel: u8,
    /// Logical tick, advanced once per full channel cycle
    pub tick: u64,
    /// Position in the step list
    pub step_position: usize,
    /// Records handed to the sink so far
    pub emitted: u64,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    /// Fresh counters; the tick starts at 1
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            channel: 0,
            tick: 1,
            step_position: 0,
            emitted: 0,
        }
    }

    /// Move to the next channel. After the last channel the tick advances
    /// and the step position moves to `next_step_position`.
    pub fn advance(&mut self, next_step_position: usize) {
        if self.channel + 1 < CHANNEL_COUNT {
            self.channel += 1;
        } else {
            self.channel = 0;
            self.tick += 1;
            self.step_position = next_step_position;
        }
    }
}
