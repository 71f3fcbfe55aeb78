use std::time::Duration;

use super::alert_fmt::{format_alert_line, format_stopped_by_user, format_transport_failure};
use super::table_fmt::{format_header, format_row, format_rule};
use crate::domain::entities::alert::AlertRecord;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::notifier::TransportError;
use crate::domain::ports::renderer::LineRenderer;
use crate::domain::value_objects::status::Status;

/// Coloured table and alert lines for an interactive terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LineRenderer for TerminalRenderer {
    fn table_header(&self) -> Vec<String> {
        vec![format_header(), format_rule()]
    }

    fn row(&self, elapsed: Duration, sample: &Sample, status: Status) -> String {
        format_row(elapsed, sample, status)
    }

    fn alert_line(&self, alert: &AlertRecord) -> String {
        format_alert_line(alert)
    }

    fn transport_failure(&self, error: &TransportError) -> String {
        format_transport_failure(error)
    }

    fn stopped_by_user(&self) -> String {
        format_stopped_by_user()
    }
}
