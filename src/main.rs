mod adapters;
mod application;
mod cli;
mod config;
mod domain;
mod ports;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{ConsoleLogSink, LogFile, ProcfsConfig, ProcfsResourceSource, ReqwestProbe};
use application::{forward_interrupts, stop_channel, Monitor, ResourceMonitor, Sampler, Scheduler, StopSignal, UptimeMonitor};
use cli::{Cli, Command};
use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging; stdout is reserved for the operator console
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("healthmon={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("🚀 Starting healthmon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    let (stop_handle, stop) = stop_channel();
    tokio::spawn(async move {
        // A second Ctrl+C skips waiting for a hung check to time out
        match forward_interrupts(stop_handle, tokio::signal::ctrl_c).await {
            Ok(()) => std::process::exit(130),
            Err(e) => warn!("⚠ Failed to listen for Ctrl+C: {}", e),
        }
    });

    // Initialize adapters
    let probe = ReqwestProbe::new(config.uptime.timeout())?;
    let procfs_config = ProcfsConfig::new(config.proc_path.clone(), config.resources.disk_path.clone());
    let source = ProcfsResourceSource::new(procfs_config, config.resources.cpu_window());
    let sampler = Sampler::new(Arc::new(probe), Arc::new(source));

    match cli.command {
        Command::Uptime(args) => {
            let registry = config.uptime_registry()?;
            if registry.is_empty() {
                warn!("⚠ No uptime targets configured; passes will be empty");
            }
            let interval = args.interval.unwrap_or(config.uptime.interval_secs);
            let monitor = UptimeMonitor::new(
                registry,
                sampler,
                open_sink(&config.uptime.log_file),
                Duration::from_secs(interval),
                config.uptime.history_size,
            );
            drive(monitor, stop, args.once).await;
        }
        Command::Resources(args) => {
            let interval = args.interval.unwrap_or(config.resources.interval_secs);
            let monitor = ResourceMonitor::new(
                sampler,
                config.resources.thresholds,
                open_sink(&config.resources.log_file),
                Duration::from_secs(interval),
            );
            drive(monitor, stop, args.once).await;
        }
    }

    Ok(())
}

async fn drive<M: Monitor>(monitor: M, stop: StopSignal, once: bool) {
    let mut scheduler = Scheduler::new(monitor, stop);
    if once {
        scheduler.run_once().await;
    } else {
        scheduler.run().await;
    }
}

/// Console sink with the log file attached when it can be opened
fn open_sink(path: &Path) -> ConsoleLogSink {
    match LogFile::open(path) {
        Ok(log_file) => {
            info!("✓ Logging to {}", path.display());
            ConsoleLogSink::stdout(Some(log_file))
        }
        Err(e) => {
            warn!("⚠ Failed to open log file {}: {}. Console output only.", path.display(), e);
            ConsoleLogSink::stdout(None)
        }
    }
}
