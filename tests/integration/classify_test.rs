#![allow(clippy::expect_used)]

use chrono::Utc;
use resmon::domain::classifier::{alert_for, classify};
use resmon::domain::entities::sample::Sample;
use resmon::domain::value_objects::severity::Severity;
use resmon::domain::value_objects::status::Status;
use resmon::domain::value_objects::thresholds::Thresholds;

fn load_fixture(name: &str) -> Vec<Sample> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    let json = std::fs::read_to_string(&path).expect("Failed to read fixture");
    serde_json::from_str(&json).expect("Failed to parse fixture")
}

fn make_sample(cpu_percent: f64, memory_percent: f64) -> Sample {
    Sample {
        timestamp: Utc::now(),
        cpu_percent,
        memory_percent,
        memory_used_bytes: 4_294_967_296,
        memory_total_bytes: 17_179_869_184,
    }
}

// --- Status boundaries ---

#[test]
fn both_below_threshold_is_ok() {
    let status = classify(&make_sample(49.9, 79.9), &Thresholds::default());
    assert_eq!(status, Status::Ok);
}

#[test]
fn only_cpu_high() {
    let status = classify(&make_sample(75.0, 20.0), &Thresholds::default());
    assert_eq!(status, Status::CpuHigh);
}

#[test]
fn only_memory_high() {
    let status = classify(&make_sample(5.0, 95.0), &Thresholds::default());
    assert_eq!(status, Status::MemHigh);
}

#[test]
fn both_high_is_critical() {
    let status = classify(&make_sample(99.0, 99.0), &Thresholds::default());
    assert_eq!(status, Status::Critical);
}

#[test]
fn threshold_values_are_inclusive() {
    let thresholds = Thresholds::new(50.0, 80.0);
    assert_eq!(classify(&make_sample(50.0, 10.0), &thresholds), Status::CpuHigh);
    assert_eq!(classify(&make_sample(10.0, 80.0), &thresholds), Status::MemHigh);
    assert_eq!(classify(&make_sample(50.0, 80.0), &thresholds), Status::Critical);
}

#[test]
fn extremes_of_the_range() {
    let thresholds = Thresholds::default();
    assert_eq!(classify(&make_sample(0.0, 0.0), &thresholds), Status::Ok);
    assert_eq!(
        classify(&make_sample(100.0, 100.0), &thresholds),
        Status::Critical
    );
}

#[test]
fn threshold_of_100_only_trips_at_full_load() {
    let thresholds = Thresholds::new(100.0, 100.0);
    assert_eq!(classify(&make_sample(99.9, 99.9), &thresholds), Status::Ok);
    assert_eq!(classify(&make_sample(100.0, 0.0), &thresholds), Status::CpuHigh);
}

#[test]
fn classify_is_idempotent() {
    let thresholds = Thresholds::new(60.0, 70.0);
    for (cpu, mem) in [(10.0, 10.0), (60.0, 5.0), (5.0, 70.0), (88.0, 91.0)] {
        let sample = make_sample(cpu, mem);
        let first = classify(&sample, &thresholds);
        let second = classify(&sample, &thresholds);
        assert_eq!(first, second, "classification changed for ({cpu}, {mem})");
    }
}

// --- Fixture sequence ---

#[test]
fn fixture_sequence_classifies_as_expected() {
    let samples = load_fixture("mixed_load.json");
    let statuses: Vec<Status> = samples
        .iter()
        .map(|s| classify(s, &Thresholds::default()))
        .collect();

    assert_eq!(
        statuses,
        vec![
            Status::Ok,
            Status::CpuHigh,
            Status::MemHigh,
            Status::Critical,
            Status::Ok,
        ]
    );
}

#[test]
fn fixture_sequence_raises_one_alert_per_non_ok_tick() {
    let samples = load_fixture("mixed_load.json");
    let alerts: Vec<_> = samples
        .iter()
        .filter_map(|s| alert_for(s, classify(s, &Thresholds::default()), "fixture-host"))
        .collect();

    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[0].message, "High CPU usage: 67.9%");
    assert_eq!(alerts[1].severity, Severity::Warning);
    assert_eq!(alerts[1].message, "High memory usage: 80.0%");
    assert_eq!(alerts[2].severity, Severity::Critical);
    assert_eq!(
        alerts[2].message,
        "CRITICAL: Both CPU (96.2%) and Memory (91.7%) are high!"
    );
    assert!(alerts.iter().all(|a| a.host == "fixture-host"));
    assert_eq!(alerts[2].timestamp, samples[3].timestamp);
}
