#![allow(clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use resmon::application::services::alert_sink::AlertSink;
use resmon::application::services::monitor::MonitorService;
use resmon::domain::entities::alert::AlertRecord;
use resmon::domain::entities::sample::Sample;
use resmon::domain::ports::notifier::{Notifier, TransportError};
use resmon::domain::ports::output::{OutputError, OutputSink};
use resmon::domain::ports::sampler::{Sampler, SamplingError};
use resmon::domain::value_objects::severity::Severity;
use resmon::domain::value_objects::thresholds::Thresholds;
use resmon::infrastructure::notifications::composite::CompositeNotifier;
use resmon::infrastructure::output::{LogFileOutput, MultiOutput};
use resmon::presentation::cli::formatters::TerminalRenderer;

const FAST: Duration = Duration::from_millis(1);

fn load_fixture(name: &str) -> Vec<Sample> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

// --- Mock ports ---

struct ScriptedSampler {
    samples: Mutex<VecDeque<Sample>>,
}

impl ScriptedSampler {
    fn from_readings(readings: &[(f64, f64)]) -> Self {
        Self::from_samples(
            readings
                .iter()
                .map(|&(cpu_percent, memory_percent)| Sample {
                    timestamp: Utc::now(),
                    cpu_percent,
                    memory_percent,
                    memory_used_bytes: 3_221_225_472,
                    memory_total_bytes: 8_589_934_592,
                })
                .collect(),
        )
    }

    fn from_samples(samples: Vec<Sample>) -> Self {
        Self {
            samples: Mutex::new(samples.into()),
        }
    }
}

impl Sampler for ScriptedSampler {
    fn sample(&self) -> Result<Sample, SamplingError> {
        self.samples
            .lock()
            .expect("lock")
            .pop_front()
            .ok_or_else(|| SamplingError::MetricsUnavailable("no more samples".into()))
    }
}

/// Shares its buffer so a copy can sit inside a `MultiOutput`.
#[derive(Clone, Default)]
struct RecordingOutput {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingOutput {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lock").clone()
    }

    fn rows(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.contains(" GB | "))
            .collect()
    }
}

impl OutputSink for RecordingOutput {
    fn write_line(&self, line: &str) -> Result<(), OutputError> {
        self.lines.lock().expect("lock").push(line.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingTransport {
    received: Mutex<Vec<AlertRecord>>,
}

impl Notifier for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn notify(&self, alert: &AlertRecord) -> Result<(), TransportError> {
        self.received.lock().expect("lock").push(alert.clone());
        Ok(())
    }
}

struct FailingTransport {
    attempts: AtomicUsize,
}

impl Notifier for FailingTransport {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn notify(&self, _alert: &AlertRecord) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::SendFailed("SMTP 535 authentication failed".into()))
    }
}

// --- Runs ---

#[tokio::test]
async fn one_non_ok_tick_counts_one_alert() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(10.0, 20.0), (90.0, 10.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::new(50.0, 80.0),
        "test-host",
    );

    let summary = service
        .run(FAST, 2, std::future::pending())
        .await
        .expect("run");

    assert_eq!(summary.alert_count, 1);
    assert_eq!(summary.ticks_completed, 2);
    assert!(!summary.interrupted);

    let received = transport.received.lock().expect("lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].severity, Severity::Warning);
    assert_eq!(received[0].message, "High CPU usage: 90.0%");
    assert_eq!(received[0].host, "test-host");

    let rows = output.rows();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].ends_with("OK    "));
    assert!(rows[1].contains("CPU HIGH"));
}

#[tokio::test]
async fn transport_failure_does_not_stop_the_next_row() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(70.0, 10.0), (20.0, 10.0), (20.0, 85.0)]);
    let output = RecordingOutput::default();
    let transport = FailingTransport {
        attempts: AtomicUsize::new(0),
    };
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let summary = service
        .run(FAST, 3, std::future::pending())
        .await
        .expect("transport errors are not fatal");

    assert_eq!(summary.alert_count, 2);
    assert_eq!(summary.ticks_completed, 3);
    assert_eq!(transport.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(output.rows().len(), 3);

    let lines = output.lines();
    let failures: Vec<_> = lines
        .iter()
        .filter(|l| l.starts_with("[TRANSPORT] "))
        .collect();
    assert_eq!(failures.len(), 2);
    assert!(failures[0].contains("535 authentication failed"));
}

#[tokio::test]
async fn interrupt_during_sleep_returns_summary() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(90.0, 90.0), (10.0, 10.0), (10.0, 10.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let summary = service
        .run(
            Duration::from_secs(10),
            3,
            tokio::time::sleep(Duration::from_millis(30)),
        )
        .await
        .expect("interruption is a clean stop");

    assert!(summary.interrupted);
    assert_eq!(summary.ticks_completed, 1);
    assert_eq!(summary.alert_count, 1);

    let lines = output.lines();
    assert!(lines
        .iter()
        .any(|l| l.contains("Monitoring stopped by user")));
    let last = lines.last().expect("summary line");
    assert!(last.starts_with("[INFO] "));
    assert!(last.ends_with("Monitoring complete. 1 alerts triggered during this session."));
}

#[tokio::test]
async fn critical_tick_counts_and_dispatches_once() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(95.0, 95.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let summary = service
        .run(FAST, 1, std::future::pending())
        .await
        .expect("run");

    assert_eq!(summary.alert_count, 1);
    let received = transport.received.lock().expect("lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].severity, Severity::Critical);
    assert_eq!(
        received[0].message,
        "CRITICAL: Both CPU (95.0%) and Memory (95.0%) are high!"
    );
}

#[tokio::test]
async fn quiet_run_emits_summary_without_dispatch() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(5.0, 30.0), (6.0, 31.0), (7.0, 32.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let summary = service
        .run(FAST, 3, std::future::pending())
        .await
        .expect("run");

    assert_eq!(summary.alert_count, 0);
    assert!(transport.received.lock().expect("lock").is_empty());

    let lines = output.lines();
    let info: Vec<_> = lines.iter().filter(|l| l.starts_with("[INFO] ")).collect();
    assert_eq!(info.len(), 1);
    assert!(info[0].ends_with("Monitoring complete. No alerts triggered during this session."));
}

#[tokio::test]
async fn sampling_failure_aborts_the_run() {
    let sampler = ScriptedSampler::from_readings(&[(10.0, 10.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let err = service
        .run(FAST, 2, std::future::pending())
        .await
        .expect_err("second sample is missing");
    assert!(matches!(err, SamplingError::MetricsUnavailable(_)));
    assert!(!output
        .lines()
        .iter()
        .any(|l| l.starts_with("[INFO] ")));
}

#[tokio::test]
async fn fixture_run_through_composite_and_log_file() {
    colored::control::set_override(false);
    let dir = tempfile::tempdir().expect("create tempdir");
    let log_path = dir.path().join("logs").join("resmon.log");

    let recorder = RecordingOutput::default();
    let sinks: Vec<Box<dyn OutputSink>> = vec![
        Box::new(recorder.clone()),
        Box::new(LogFileOutput::new(&log_path.to_string_lossy())),
    ];
    let output = MultiOutput::new(sinks);
    let notifiers: Vec<Box<dyn Notifier>> = vec![
        Box::new(RecordingTransport::default()),
        Box::new(FailingTransport {
            attempts: AtomicUsize::new(0),
        }),
    ];
    let transports = CompositeNotifier::new(notifiers);
    let sink = AlertSink::new(&output, &transports, &TerminalRenderer, false);
    let sampler = ScriptedSampler::from_samples(load_fixture("mixed_load.json"));
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "fixture-host",
    );

    let summary = service
        .run(FAST, 5, std::future::pending())
        .await
        .expect("run");
    assert_eq!(summary.alert_count, 3);
    assert_eq!(summary.ticks_completed, 5);

    let logged = std::fs::read_to_string(&log_path).expect("read log file");
    let logged: Vec<&str> = logged.lines().collect();
    assert_eq!(logged, recorder.lines());
    assert!(!logged.iter().any(|l| l.contains('\x1b')));
    assert_eq!(
        logged.iter().filter(|l| l.starts_with("[TRANSPORT] ")).count(),
        3
    );
}

#[tokio::test]
async fn stop_already_requested_still_reports_and_summarises() {
    colored::control::set_override(false);
    let sampler = ScriptedSampler::from_readings(&[(90.0, 10.0)]);
    let output = RecordingOutput::default();
    let transport = RecordingTransport::default();
    let sink = AlertSink::new(&output, &transport, &TerminalRenderer, false);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &TerminalRenderer,
        Thresholds::default(),
        "test-host",
    );

    let summary = service
        .run(Duration::from_secs(1), 1, std::future::ready(()))
        .await
        .expect("stop is a clean exit");

    assert!(summary.interrupted);
    assert!(transport.received.lock().expect("lock").is_empty());
    let lines = output.lines();
    assert!(lines
        .iter()
        .any(|l| l.contains("Monitoring stopped by user")));
    assert!(lines.last().expect("summary line").starts_with("[INFO] "));
}
