//! Run controller
//!
//! Paces emissions: pick the power, synthesize a record for the current
//! channel, hand it to the sink, sleep, advance the counters, and stop at
//! the deadline or on cancellation. The sink is closed on every exit path.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{current_run_id, RunConfig, RunPhase, RunState, RunSummary, StopReason, Variant};
use crate::error::{ConfigError, RunError};
use crate::power::PowerSource;
use crate::synth::{MeasurementSynthesizer, SampleRequest};
use crate::telemetry::{TestConfiguration, TimeReading};
use crate::transport::{encode_record, DatagramSink};

/// Drives a single simulator run
pub struct RunController<S, R = StdRng> {
    config: RunConfig,
    test_config: TestConfiguration,
    power: PowerSource,
    sink: S,
    synth: MeasurementSynthesizer<R>,
    phase: RunPhase,
    state: RunState,
}

impl<S: DatagramSink, R: Rng> RunController<S, R> {
    /// Validate the settings and take ownership of an open sink
    pub fn new(
        config: RunConfig,
        sink: S,
        synth: MeasurementSynthesizer<R>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let test_config = config.test_configuration()?;
        let power = config.power_source();

        debug!(
            "Run initialized: variant={}, config={}, power={:?}",
            config.variant, test_config, power
        );

        Ok(Self {
            config,
            test_config,
            power,
            sink,
            synth,
            phase: RunPhase::Initializing,
            state: RunState::new(),
        })
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Counters of the current (or finished) run
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Settings of this run
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The sink the controller sends through
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink, e.g. to inspect a test double
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Emit records until the deadline passes or `cancel` fires.
    ///
    /// At least one record is emitted before the deadline is first checked,
    /// so a zero timeout sends exactly one record. Without a timeout the run
    /// only ends through `cancel`.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<RunSummary, RunError> {
        if self.phase != RunPhase::Initializing {
            return Err(RunError::AlreadyTerminated);
        }

        let run_id = current_run_id();
        let start = Instant::now();
        let deadline = self.config.timeout_duration();
        let delay = self.config.delay_duration();

        self.set_phase(RunPhase::Running);
        info!(
            "Run {} started ({} variant, {})",
            run_id,
            self.config.variant,
            match deadline {
                Some(d) => format!("timeout {:.3}s", d.as_secs_f64()),
                None => "until interrupted".to_string(),
            }
        );

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            let next_step_position = self.emit(run_id);

            let interrupted = tokio::select! {
                biased;
                _ = cancel.cancelled() => true,
                _ = sleep(delay) => false,
            };

            if interrupted || cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            self.state.advance(next_step_position);
            self.state.elapsed = start.elapsed();

            if deadline_reached(self.state.elapsed, deadline) {
                break StopReason::Deadline;
            }
        };

        self.set_phase(RunPhase::Stopping);
        self.sink.close();
        self.set_phase(RunPhase::Terminated);

        let summary = RunSummary {
            run_id,
            emitted: self.state.emitted,
            elapsed: start.elapsed(),
            stop_reason,
        };
        info!(
            "Run {} stopped ({:?}): {} records in {:.3}s",
            run_id,
            summary.stop_reason,
            summary.emitted,
            summary.elapsed.as_secs_f64()
        );

        Ok(summary)
    }

    /// Synthesize and send one record; returns the step position for the
    /// next channel cycle
    fn emit(&mut self, run_id: f64) -> usize {
        let reading = self.power.power_at(self.state.step_position);
        let time = match self.config.variant {
            Variant::Continuous => TimeReading::Elapsed(self.state.elapsed.as_secs_f64()),
            Variant::Sweep => TimeReading::Tick(self.state.tick),
        };

        let record = self.synth.synthesize(&SampleRequest {
            run_id,
            time,
            channel: self.state.channel,
            power: reading.power,
            config: self.test_config,
            step: reading.step,
        });

        match encode_record(&record) {
            Ok(payload) => {
                if self.config.verbose {
                    info!("{}", String::from_utf8_lossy(&payload));
                }
                self.sink.send(&payload);
                self.state.emitted += 1;
            }
            Err(e) => warn!("Dropping record for channel {}: {}", record.escid, e),
        }

        reading.next_position
    }

    fn set_phase(&mut self, phase: RunPhase) {
        debug!("Run phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

fn deadline_reached(elapsed: Duration, deadline: Option<Duration>) -> bool {
    deadline.is_some_and(|d| elapsed >= d)
}
