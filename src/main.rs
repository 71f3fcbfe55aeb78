use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use resmon::application::config::AppConfig;
use resmon::domain::value_objects::thresholds::Thresholds;
use resmon::infrastructure::samplers::SysinfoSampler;
use resmon::presentation::cli::app::{Cli, Commands, RunArgs};
use resmon::presentation::cli::commands::config::run_config;
use resmon::presentation::cli::commands::run::{apply_overrides, run_monitor};
use resmon::presentation::cli::commands::status::run_status;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    // stderr keeps the table on stdout clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<(AppConfig, PathBuf)> {
    if let Some(path) = explicit {
        let config = AppConfig::load_from(&path)?;
        Ok((config, path))
    } else {
        let path = AppConfig::config_path()?;
        let config = AppConfig::load_or_create(&path)?;
        Ok((config, path))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let (mut config, config_path) = load_config(cli.config)?;

    match cli.command {
        Some(Commands::Status { json }) => {
            config.validate()?;
            let sampler = SysinfoSampler::new();
            run_status(&sampler, &Thresholds::from(&config.thresholds), json)?;
        }
        Some(Commands::Config { path }) => {
            run_config(&config, &config_path, path)?;
        }
        Some(Commands::Run(args)) => run(&mut config, &args).await?,
        None => run(&mut config, &RunArgs::default()).await?,
    }

    Ok(())
}

async fn run(config: &mut AppConfig, args: &RunArgs) -> anyhow::Result<()> {
    apply_overrides(config, args);
    config.validate()?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    // Ctrl+C resolves the shutdown future; if the handler cannot be
    // installed the run simply goes to completion.
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(());
            }
            Err(e) => tracing::warn!("Cannot listen for Ctrl+C: {e}"),
        }
    });
    let shutdown = async move {
        if stop_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let summary = run_monitor(config, shutdown).await?;
    if summary.interrupted {
        tracing::info!(
            "Stopped by user after {} of {} tick(s)",
            summary.ticks_completed,
            config.general.duration_ticks
        );
    }
    Ok(())
}
