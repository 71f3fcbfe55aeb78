use std::future::Future;

use anyhow::Context;

use crate::application::config::AppConfig;
use crate::application::services::alert_sink::AlertSink;
use crate::application::services::monitor::MonitorService;
use crate::domain::entities::summary::RunSummary;
use crate::domain::ports::notifier::Notifier;
use crate::domain::ports::output::OutputSink;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::Thresholds;
use crate::infrastructure::notifications::composite::CompositeNotifier;
use crate::infrastructure::notifications::email::EmailNotifier;
use crate::infrastructure::notifications::webhook::WebhookNotifier;
use crate::infrastructure::output::{ConsoleOutput, LogFileOutput, MultiOutput};
use crate::infrastructure::samplers::SysinfoSampler;
use crate::presentation::cli::app::RunArgs;
use crate::presentation::cli::formatters::alert_fmt::format_sampling_failure;
use crate::presentation::cli::formatters::TerminalRenderer;

/// Fold command-line overrides into the loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, args: &RunArgs) {
    if let Some(interval) = args.interval {
        config.general.interval_secs = interval;
    }
    if let Some(ticks) = args.ticks {
        config.general.duration_ticks = ticks;
    }
    if let Some(cpu) = args.cpu_threshold {
        config.thresholds.cpu_percent = cpu;
    }
    if let Some(memory) = args.memory_threshold {
        config.thresholds.memory_percent = memory;
    }
    if let Some(ref path) = args.log_file {
        config.output.log_file = Some(path.clone());
    }
    if args.no_email {
        if let Some(email) = config.notifications.email.as_mut() {
            email.enabled = false;
        }
    }
}

/// Console, plus the log file when one is configured.
#[must_use]
pub fn build_output(config: &AppConfig) -> MultiOutput {
    let mut output = MultiOutput::default();
    output.push(Box::new(ConsoleOutput::new()));
    if let Some(ref path) = config.output.log_file {
        let log_file = LogFileOutput::new(path);
        tracing::info!("Mirroring output to {}", log_file.path().display());
        output.push(Box::new(log_file));
    }
    output
}

/// Every enabled transport behind one fan-out notifier.
///
/// # Errors
///
/// Returns an error if the SMTP password is missing or a transport cannot
/// be initialized.
pub fn build_transports(config: &AppConfig) -> anyhow::Result<CompositeNotifier> {
    let timeout = config.transport_timeout();
    let mut transports: Vec<Box<dyn Notifier>> = Vec::new();

    if let Some(email) = config.active_email() {
        let settings = email.resolve(timeout)?;
        let notifier = EmailNotifier::new(&settings).context("Failed to set up email alerts")?;
        transports.push(Box::new(notifier));
    }

    if let Some(ref url) = config.notifications.webhook_url {
        let min_severity = config
            .notifications
            .webhook_min_severity
            .unwrap_or(Severity::Warning);
        let notifier = WebhookNotifier::new(url.clone(), min_severity, timeout)
            .context("Failed to set up webhook alerts")?;
        transports.push(Box::new(notifier));
    }

    let transports = CompositeNotifier::new(transports);
    if transports.is_empty() {
        tracing::info!("No alert transport configured, alerts stay local");
    } else {
        tracing::info!("Alert transports: {}", transports.channel_names().join(", "));
    }
    Ok(transports)
}

/// Run one monitoring session against the live host.
///
/// # Errors
///
/// Returns an error if a transport cannot be set up or sampling fails.
pub async fn run_monitor<F>(config: &AppConfig, shutdown: F) -> anyhow::Result<RunSummary>
where
    F: Future<Output = ()>,
{
    let output = build_output(config);
    let transports = build_transports(config)?;
    let sampler = SysinfoSampler::new();
    let host = config
        .general
        .host
        .clone()
        .unwrap_or_else(SysinfoSampler::host_name);

    write_banner(&output);

    let renderer = TerminalRenderer::new();
    let sink = AlertSink::new(&output, &transports, &renderer, config.output.bell);
    let service = MonitorService::new(
        &sampler,
        &sink,
        &output,
        &renderer,
        Thresholds::from(&config.thresholds),
        host,
    );

    match service
        .run(config.interval(), config.general.duration_ticks, shutdown)
        .await
    {
        Ok(summary) => Ok(summary),
        Err(e) => {
            let _ = output.write_line(&format_sampling_failure(&e));
            Err::<RunSummary, _>(e).context("Monitoring aborted")
        }
    }
}

fn write_banner(output: &dyn OutputSink) {
    for line in [
        "Starting system monitoring with alerts...",
        "Press Ctrl+C to stop monitoring",
        "",
    ] {
        if let Err(e) = output.write_line(line) {
            tracing::warn!("Failed to write output: {e}");
        }
    }
}
