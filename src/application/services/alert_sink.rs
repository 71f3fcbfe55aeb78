use std::io::Write;

use crate::domain::entities::alert::AlertRecord;
use crate::domain::ports::notifier::{Notifier, TransportError};
use crate::domain::ports::output::OutputSink;
use crate::domain::ports::renderer::LineRenderer;
use crate::domain::value_objects::severity::Severity;

/// Renders alerts to the output sinks and forwards WARNING and CRITICAL
/// alerts to the external transports.
pub struct AlertSink<'a> {
    output: &'a dyn OutputSink,
    transports: &'a dyn Notifier,
    renderer: &'a dyn LineRenderer,
    bell: bool,
}

impl<'a> AlertSink<'a> {
    #[must_use]
    pub fn new(
        output: &'a dyn OutputSink,
        transports: &'a dyn Notifier,
        renderer: &'a dyn LineRenderer,
        bell: bool,
    ) -> Self {
        Self {
            output,
            transports,
            renderer,
            bell,
        }
    }

    /// Write the alert line, then dispatch it when its severity warrants.
    ///
    /// Output failures are only logged. A transport failure is logged,
    /// reported on the output as a `[TRANSPORT]` line and returned so the
    /// caller can decide what to do with it; the alert line itself has
    /// already been written by then.
    ///
    /// # Errors
    ///
    /// Returns the first [`TransportError`] raised by the transports.
    pub fn emit(&self, alert: &AlertRecord) -> Result<(), TransportError> {
        if let Err(e) = self.output.write_line(&self.renderer.alert_line(alert)) {
            tracing::warn!("Failed to write alert line: {e}");
        }

        if alert.severity == Severity::Critical && self.bell {
            ring_bell();
        }

        if !alert.severity.is_dispatchable() {
            return Ok(());
        }

        self.transports.notify(alert).map_err(|e| {
            tracing::warn!("Alert delivery via {} failed: {e}", self.transports.name());
            if let Err(out) = self.output.write_line(&self.renderer.transport_failure(&e)) {
                tracing::warn!("Failed to write transport failure: {out}");
            }
            e
        })
    }
}

fn ring_bell() {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
}
