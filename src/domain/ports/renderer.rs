use std::time::Duration;

use crate::domain::entities::alert::AlertRecord;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::notifier::TransportError;
use crate::domain::value_objects::status::Status;

/// Turns monitoring events into display lines. Where the lines go is up to
/// the [`OutputSink`](super::output::OutputSink).
pub trait LineRenderer: Send + Sync {
    /// Lines printed once before the first row.
    fn table_header(&self) -> Vec<String>;

    fn row(&self, elapsed: Duration, sample: &Sample, status: Status) -> String;

    fn alert_line(&self, alert: &AlertRecord) -> String;

    fn transport_failure(&self, error: &TransportError) -> String;

    fn stopped_by_user(&self) -> String;
}
