use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Periodic health monitor for HTTP endpoints and local OS resources
#[derive(Debug, Parser)]
#[command(name = "healthmon", version, about)]
pub struct Cli {
    /// TOML file with targets and thresholds
    #[arg(short, long, env = "HEALTHMON_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check HTTP endpoints and track rolling uptime
    Uptime(RunArgs),
    /// Sample CPU, memory, disk and process count against thresholds
    Resources(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Seconds to idle between passes
    #[arg(long)]
    pub interval: Option<u64>,

    /// Run a single pass and exit
    #[arg(long)]
    pub once: bool,
}
