use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// resmon: CPU and memory monitor with threshold alerts
///
/// Samples CPU and memory at a fixed interval, prints one table row per
/// tick and raises alerts when a reading reaches its threshold.
#[derive(Parser, Debug)]
#[command(name = "resmon")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to custom config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a bounded monitoring session
    #[command(alias = "r")]
    Run(RunArgs),

    /// Take one sample and print it
    #[command(alias = "s")]
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    #[command(alias = "c")]
    Config {
        /// Print only the config file path
        #[arg(short, long)]
        path: bool,
    },
}

/// Overrides applied on top of the config file for one run.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Seconds between samples
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Number of samples to take
    #[arg(short, long)]
    pub ticks: Option<u64>,

    /// CPU alert threshold in percent
    #[arg(long)]
    pub cpu_threshold: Option<f64>,

    /// Memory alert threshold in percent
    #[arg(long)]
    pub memory_threshold: Option<f64>,

    /// Mirror the console output into this file
    #[arg(long)]
    pub log_file: Option<String>,

    /// Disable the email transport for this run
    #[arg(long)]
    pub no_email: bool,
}
