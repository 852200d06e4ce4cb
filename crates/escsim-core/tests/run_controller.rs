//! Tests for the run controller's pacing, channel cycling and shutdown

use std::time::Duration;

use escsim_core::prelude::*;
use escsim_core::transport::decode_record;
use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

/// Sink that keeps every payload in memory
#[derive(Default)]
struct RecordingSink {
    payloads: Vec<Vec<u8>>,
    open: bool,
    close_calls: usize,
    sends_after_close: usize,
}

impl RecordingSink {
    fn new() -> Self {
        Self {
            open: true,
            ..Default::default()
        }
    }

    fn records(&self) -> Vec<MeasurementRecord> {
        self.payloads
            .iter()
            .map(|p| decode_record(p).expect("payload decodes"))
            .collect()
    }
}

impl DatagramSink for RecordingSink {
    fn send(&mut self, payload: &[u8]) {
        if self.open {
            self.payloads.push(payload.to_vec());
        } else {
            self.sends_after_close += 1;
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

fn controller(config: RunConfig) -> RunController<RecordingSink> {
    RunController::new(config, RecordingSink::new(), MeasurementSynthesizer::with_seed(11))
        .expect("valid config")
}

#[tokio::test(start_paused = true)]
async fn test_deadline_stops_continuous_run() {
    let config = RunConfig {
        timeout: Some(1.0),
        delay: 0.2,
        ..Default::default()
    };
    let mut ctrl = controller(config);
    assert_eq!(ctrl.phase(), RunPhase::Initializing);

    let summary = ctrl.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Deadline);
    assert_eq!(summary.emitted, 5);
    assert_eq!(ctrl.phase(), RunPhase::Terminated);

    let sink = ctrl.into_sink();
    assert!(!sink.is_open());
    assert_eq!(sink.close_calls, 1);

    let records = sink.records();
    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.vehicle, "d126");
        assert!((record.testid - summary.run_id).abs() < 1e-3);
        assert_eq!(record.params.power, 20);
        assert_eq!(record.params.step, None);
        assert_eq!(record.params.config, TestConfiguration::All4);
    }

    // Continuous variant reports elapsed seconds
    let times: Vec<f64> = records.iter().map(|r| r.measurements.time.as_f64()).collect();
    assert_eq!(times[0], 0.0);
    for pair in times.windows(2) {
        assert!(pair[1] > pair[0], "time must increase: {:?}", times);
    }
    assert!((times[4] - 0.8).abs() < 0.01, "last time {}", times[4]);
}

#[tokio::test(start_paused = true)]
async fn test_channels_cycle_and_tick_advances_every_four() {
    let config = RunConfig {
        timeout: Some(2.0),
        delay: 0.1,
        variant: Variant::Sweep,
        ..Default::default()
    };
    let mut ctrl = controller(config);
    let summary = ctrl.run(CancellationToken::new()).await.unwrap();
    assert_eq!(summary.emitted, 20);

    let records = ctrl.into_sink().records();
    let escids: Vec<u8> = records.iter().map(|r| r.escid).collect();
    let expected: Vec<u8> = (0..20).map(|i| (i % 4) as u8).collect();
    assert_eq!(escids, expected);

    let ticks: Vec<TimeReading> = records.iter().map(|r| r.measurements.time).collect();
    let expected_ticks: Vec<TimeReading> =
        (0..20).map(|i| TimeReading::Tick(1 + i / 4)).collect();
    assert_eq!(ticks, expected_ticks);
}

#[tokio::test(start_paused = true)]
async fn test_step_list_loops_once_per_channel_cycle() {
    let config = RunConfig {
        timeout: Some(2.4),
        delay: 0.1,
        variant: Variant::Sweep,
        steps: Some(vec![10, 30, 50]),
        config: 1,
        ..Default::default()
    };
    let mut ctrl = controller(config);
    let summary = ctrl.run(CancellationToken::new()).await.unwrap();
    assert_eq!(summary.emitted, 24);

    let records = ctrl.into_sink().records();
    let powers: Vec<u8> = records.iter().map(|r| r.params.power).collect();
    let expected: Vec<u8> = [10, 30, 50, 10, 30, 50]
        .iter()
        .flat_map(|&p| [p; 4])
        .collect();
    assert_eq!(powers, expected);

    for record in &records {
        assert_eq!(record.params.step, Some(record.params.power));
        // Configuration is metadata only: all four channels still cycle
        assert_eq!(record.params.config, TestConfiguration::Single);
    }
    assert!(records.iter().any(|r| r.escid == 3));
}

#[tokio::test(start_paused = true)]
async fn test_empty_steps_use_fixed_power() {
    let config = RunConfig {
        timeout: Some(0.4),
        delay: 0.1,
        variant: Variant::Sweep,
        steps: Some(Vec::new()),
        power: 45,
        ..Default::default()
    };
    let mut ctrl = controller(config);
    ctrl.run(CancellationToken::new()).await.unwrap();

    for record in ctrl.into_sink().records() {
        assert_eq!(record.params.power, 45);
        assert_eq!(record.params.step, None);
    }
}

#[tokio::test(start_paused = true)]
async fn test_zero_timeout_emits_exactly_one_record() {
    let config = RunConfig {
        timeout: Some(0.0),
        ..Default::default()
    };
    let mut ctrl = controller(config);
    let summary = ctrl.run(CancellationToken::new()).await.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Deadline);
    assert_eq!(summary.emitted, 1);
    assert_eq!(ctrl.into_sink().payloads.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_unbounded_run_and_closes_sink() {
    let config = RunConfig {
        timeout: None,
        delay: 0.2,
        ..Default::default()
    };
    let mut ctrl = controller(config);
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            token.cancel();
        }
    };

    let (summary, _) = tokio::join!(ctrl.run(token.clone()), canceller);
    let summary = summary.unwrap();

    assert_eq!(summary.stop_reason, StopReason::Cancelled);
    assert_eq!(summary.emitted, 3);
    assert_eq!(ctrl.phase(), RunPhase::Terminated);

    let mut sink = ctrl.into_sink();
    assert!(!sink.is_open());
    assert_eq!(sink.close_calls, 1);

    // Released handle: later sends are no-ops
    sink.send(b"late");
    assert_eq!(sink.payloads.len(), 3);
    assert_eq!(sink.sends_after_close, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start_sends_nothing() {
    let mut ctrl = controller(RunConfig::default());
    let token = CancellationToken::new();
    token.cancel();

    let summary = ctrl.run(token).await.unwrap();
    assert_eq!(summary.stop_reason, StopReason::Cancelled);
    assert_eq!(summary.emitted, 0);
    assert!(!ctrl.sink().is_open());
}

#[tokio::test(start_paused = true)]
async fn test_controller_runs_once() {
    let config = RunConfig {
        timeout: Some(0.0),
        ..Default::default()
    };
    let mut ctrl = controller(config);
    ctrl.run(CancellationToken::new()).await.unwrap();

    let again = ctrl.run(CancellationToken::new()).await;
    assert!(matches!(again, Err(RunError::AlreadyTerminated)));
}

#[test]
fn test_invalid_config_rejected_before_run() {
    let config = RunConfig {
        power: 150,
        ..Default::default()
    };
    let result = RunController::new(config, RecordingSink::new(), MeasurementSynthesizer::with_seed(1));
    assert!(matches!(result, Err(ConfigError::PowerOutOfRange(150))));
}

#[test]
fn test_oversized_timings_rejected_before_run() {
    let config = RunConfig {
        timeout: Some(1e30),
        ..Default::default()
    };
    let result = RunController::new(config, RecordingSink::new(), MeasurementSynthesizer::with_seed(1));
    assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))));

    let config = RunConfig {
        delay: 1e30,
        ..Default::default()
    };
    let result = RunController::new(config, RecordingSink::new(), MeasurementSynthesizer::with_seed(1));
    assert!(matches!(result, Err(ConfigError::InvalidDelay(_))));
}
