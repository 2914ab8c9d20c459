//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use volknob_core::volume::VolumeStep;

use crate::config::LogLevel;

/// Adjust ALSA mixer volume from USB HID Consumer Control device events.
#[derive(Debug, Parser)]
#[command(name = "volknob", version)]
pub struct Cli {
    /// ALSA device to use, e.g. "hw:0" [default: default]
    #[arg(short = 'd', long)]
    pub alsa_dev: Option<String>,

    /// ALSA control to use, e.g. "Master" [default: first playback capable control]
    #[arg(short = 'c', long)]
    pub alsa_ctrl: Option<String>,

    /// Input device node [default: first USB HID device with volume keys under /dev/input]
    #[arg(short = 'i', long)]
    pub input_dev: Option<PathBuf>,

    /// Volume change per key press, in percent: 5, 10, 15, 20 or 25 [default: 10]
    #[arg(short = 'v', long, value_parser = parse_volume_step)]
    pub volume_delta: Option<VolumeStep>,

    /// Shell command to run when the power key is pressed
    #[arg(short = 'p', long)]
    pub power_off_cmd: Option<String>,

    /// Logging level [default: info]
    #[arg(short = 'l', long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Configuration file [default: $XDG_CONFIG_HOME/volknob/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_volume_step(value: &str) -> Result<VolumeStep, String> {
    let percent: u8 = value.parse().map_err(|e| format!("{e}"))?;
    VolumeStep::try_from(percent).map_err(|e| e.to_string())
}
