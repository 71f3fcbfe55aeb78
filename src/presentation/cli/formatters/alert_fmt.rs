use std::borrow::Cow;

use chrono::Local;
use colored::Colorize;

use crate::domain::entities::alert::AlertRecord;
use crate::domain::ports::notifier::TransportError;
use crate::domain::ports::sampler::SamplingError;
use crate::domain::value_objects::severity::Severity;

/// Strip C0 control characters (ESC included) so a hostile hostname or
/// message cannot inject terminal sequences. Newlines and tabs survive.
fn sanitize(s: &str) -> Cow<'_, str> {
    if s.bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
    {
        Cow::Owned(
            s.chars()
                .filter(|&c| !matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F))
                .collect(),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// `[SEVERITY] YYYY-mm-dd HH:MM:SS: message`, coloured by severity.
#[must_use]
pub fn format_alert_line(alert: &AlertRecord) -> String {
    let timestamp = alert
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    let line = format!(
        "[{}] {timestamp}: {}",
        alert.severity,
        sanitize(&alert.message)
    );
    match alert.severity {
        Severity::Info => line.bright_blue().to_string(),
        Severity::Warning => line.bright_yellow().to_string(),
        Severity::Critical => line.bright_red().to_string(),
    }
}

/// Report line for a notification that could not be delivered.
#[must_use]
pub fn format_transport_failure(error: &TransportError) -> String {
    format!("[TRANSPORT] alert delivery failed: {error}")
        .magenta()
        .to_string()
}

/// Report line for a failed OS metrics read.
#[must_use]
pub fn format_sampling_failure(error: &SamplingError) -> String {
    format!("[SAMPLING] sampling failed: {error}").red().bold().to_string()
}

#[must_use]
pub fn format_stopped_by_user() -> String {
    "\nMonitoring stopped by user".bold().to_string()
}
