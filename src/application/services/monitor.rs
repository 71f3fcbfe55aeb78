use std::future::Future;
use std::time::Duration;

use super::alert_sink::AlertSink;
use crate::domain::classifier::{alert_for, classify};
use crate::domain::entities::alert::AlertRecord;
use crate::domain::entities::summary::RunSummary;
use crate::domain::ports::output::OutputSink;
use crate::domain::ports::renderer::LineRenderer;
use crate::domain::ports::sampler::{Sampler, SamplingError};
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::status::Status;
use crate::domain::value_objects::thresholds::Thresholds;

/// Orchestrates a monitoring run: sample → classify → alert → print row.
pub struct MonitorService<'a> {
    sampler: &'a dyn Sampler,
    sink: &'a AlertSink<'a>,
    output: &'a dyn OutputSink,
    renderer: &'a dyn LineRenderer,
    thresholds: Thresholds,
    host: String,
}

impl<'a> MonitorService<'a> {
    #[must_use]
    pub fn new(
        sampler: &'a dyn Sampler,
        sink: &'a AlertSink<'a>,
        output: &'a dyn OutputSink,
        renderer: &'a dyn LineRenderer,
        thresholds: Thresholds,
        host: impl Into<String>,
    ) -> Self {
        Self {
            sampler,
            sink,
            output,
            renderer,
            thresholds,
            host: host.into(),
        }
    }

    /// Run a single tick: take a sample, raise its alert if any, print its row.
    ///
    /// Transport failures are reported by the sink and do not fail the tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler cannot read the OS metrics.
    pub fn run_tick(&self, tick: u64, interval: Duration) -> Result<Status, SamplingError> {
        let sample = self.sampler.sample()?;
        let status = classify(&sample, &self.thresholds);
        tracing::debug!(
            "Tick {tick}: cpu {:.1}%, memory {:.1}% -> {status}",
            sample.cpu_percent,
            sample.memory_percent
        );

        if let Some(alert) = alert_for(&sample, status, &self.host) {
            // already logged and reported on the output by the sink
            let _ = self.sink.emit(&alert);
        }

        let elapsed = interval.saturating_mul(u32::try_from(tick).unwrap_or(u32::MAX));
        self.write(&self.renderer.row(elapsed, &sample, status));
        Ok(status)
    }

    /// Run `duration_ticks` ticks spaced by `interval`, then emit the summary.
    ///
    /// `shutdown` is checked before every tick, raced against every pause and
    /// checked once more after the last tick. When it has resolved the run
    /// stops early, prints the stop notice and still emits its summary.
    /// No pause follows the final tick.
    ///
    /// # Errors
    ///
    /// Returns an error if a sample cannot be taken; the run ends there.
    pub async fn run<F>(
        &self,
        interval: Duration,
        duration_ticks: u64,
        shutdown: F,
    ) -> Result<RunSummary, SamplingError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(
            "Monitoring started ({duration_ticks} ticks, interval {}s)",
            interval.as_secs_f64()
        );

        for line in self.renderer.table_header() {
            self.write(&line);
        }

        let mut summary = RunSummary::default();
        for tick in 0..duration_ticks {
            if stop_requested(&mut shutdown).await {
                summary.interrupted = true;
                break;
            }

            let status = self.run_tick(tick, interval)?;
            summary.ticks_completed += 1;
            if !status.is_ok() {
                summary.alert_count += 1;
            }

            if tick + 1 == duration_ticks {
                break;
            }

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    summary.interrupted = true;
                    break;
                }
                () = tokio::time::sleep(interval) => {}
            }
        }

        // a stop that arrived during the final tick
        if !summary.interrupted && stop_requested(&mut shutdown).await {
            summary.interrupted = true;
        }

        if summary.interrupted {
            tracing::info!("Stop signal received, ending run");
            self.write(&self.renderer.stopped_by_user());
        }

        let closing = AlertRecord::new(Severity::Info, summary.message(), self.host.as_str());
        let _ = self.sink.emit(&closing);
        tracing::info!(
            "Monitoring finished: {} tick(s), {} alert(s)",
            summary.ticks_completed,
            summary.alert_count
        );
        Ok(summary)
    }

    fn write(&self, line: &str) {
        if let Err(e) = self.output.write_line(line) {
            tracing::warn!("Failed to write output: {e}");
        }
    }
}

/// Polls `shutdown` once without waiting.
async fn stop_requested<F>(shutdown: &mut std::pin::Pin<&mut F>) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = shutdown.as_mut() => true,
        () = std::future::ready(()) => false,
    }
}
