//! volknob daemon - USB HID volume keys to ALSA mixer.
//!
//! This is the main entry point for the volknob daemon, which picks an ALSA
//! playback control, waits for a USB HID remote to appear, and turns its
//! volume, mute and power keys into mixer changes.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod signals;

use volknob_alsa::AlsaMixerBackend;
use volknob_core::{Error, ShellCommand, Supervisor, SupervisorConfig};
use volknob_input::EvdevBackend;

/// Process exit statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ExitStatus {
    /// Power key, SIGINT or SIGTERM
    Success = 0,
    /// No usable ALSA playback control at startup
    NoMixer = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Load configuration
    let mut config = config::load_config(cli.config.as_deref())?;
    config.apply_cli(&cli);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(LevelFilter::from(config.daemon.log_level).into()),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting volknob daemon");

    let supervisor_config = config.supervisor_config()?;
    let power_off = ShellCommand::new(config.power.command.clone());

    // Set up signal handling
    let mut shutdown_rx = signals::setup_signal_handlers()?;

    // The supervisor blocks on device reads, so it gets its own thread
    let worker = tokio::task::spawn_blocking(move || run_supervisor(supervisor_config, power_off));

    tokio::select! {
        joined = worker => {
            let status = joined.context("Supervisor thread panicked")??;
            Ok(status.into())
        }

        _ = shutdown_rx.recv() => {
            info!("Terminating due to interrupt");
            // A read parked on the input device cannot be cancelled, so
            // leave without joining the worker.
            std::process::exit(ExitStatus::Success as i32);
        }
    }
}

/// Acquire the mixer and keep an input device attached until power-off.
fn run_supervisor(config: SupervisorConfig, power_off: ShellCommand) -> Result<ExitStatus> {
    let mut supervisor =
        match Supervisor::acquire(&AlsaMixerBackend::new(), config, EvdevBackend::default(), power_off) {
            Ok(supervisor) => supervisor,
            Err(Error::NoMixer(device)) => {
                error!(device = %device, "No ALSA mixer playback volume control available");
                return Ok(ExitStatus::NoMixer);
            }
            Err(e) => return Err(e).context("Failed to acquire ALSA mixer"),
        };

    supervisor.run().context("Input device failure")?;

    info!("volknob daemon stopped");
    Ok(ExitStatus::Success)
}
