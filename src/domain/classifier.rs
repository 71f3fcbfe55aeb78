//! Threshold classification of samples.
//!
//! Pure functions: sample + thresholds in, status (and at most one alert) out.
//! No I/O and no state carried between ticks.

use crate::domain::entities::alert::AlertRecord;
use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::status::Status;
use crate::domain::value_objects::thresholds::Thresholds;

/// Classifies a sample. Comparisons are inclusive: a reading equal to its
/// threshold counts as high.
#[must_use]
pub fn classify(sample: &Sample, thresholds: &Thresholds) -> Status {
    let cpu_high = sample.cpu_percent >= thresholds.cpu_percent;
    let mem_high = sample.memory_percent >= thresholds.memory_percent;

    match (cpu_high, mem_high) {
        (true, true) => Status::Critical,
        (true, false) => Status::CpuHigh,
        (false, true) => Status::MemHigh,
        (false, false) => Status::Ok,
    }
}

/// Builds the single alert raised for a tick, or `None` when the status is OK.
///
/// A `CRITICAL` tick yields one combined alert rather than one per resource.
#[must_use]
pub fn alert_for(sample: &Sample, status: Status, host: &str) -> Option<AlertRecord> {
    let severity = status.severity()?;
    let message = match status {
        Status::Ok => return None,
        Status::CpuHigh => format!("High CPU usage: {:.1}%", sample.cpu_percent),
        Status::MemHigh => format!("High memory usage: {:.1}%", sample.memory_percent),
        Status::Critical => format!(
            "CRITICAL: Both CPU ({:.1}%) and Memory ({:.1}%) are high!",
            sample.cpu_percent, sample.memory_percent
        ),
    };
    Some(AlertRecord::at(sample.timestamp, severity, message, host))
}
