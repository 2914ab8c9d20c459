//! Daemon configuration.
//!
//! Settings come from an optional TOML file, overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::info;

use volknob_core::supervisor::SupervisorConfig;
use volknob_core::volume::VolumeStep;

use crate::cli::Cli;

/// Daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Daemon settings
    #[serde(default)]
    pub daemon: DaemonConfig,
    /// ALSA mixer settings
    #[serde(default)]
    pub alsa: AlsaConfig,
    /// Input device settings
    #[serde(default)]
    pub input: InputConfig,
    /// Volume settings
    #[serde(default)]
    pub volume: VolumeConfig,
    /// Power key settings
    #[serde(default)]
    pub power: PowerConfig,
}

/// Log verbosity, named the way operators usually spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical | LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Daemon-specific settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DaemonConfig {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// ALSA mixer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlsaConfig {
    /// ALSA device, e.g. "hw:0"
    #[serde(default = "default_alsa_device")]
    pub device: String,
    /// Mixer control, e.g. "Master" (first playback control when unset)
    pub control: Option<String>,
}

impl Default for AlsaConfig {
    fn default() -> Self {
        Self { device: default_alsa_device(), control: None }
    }
}

fn default_alsa_device() -> String {
    "default".to_string()
}

/// Input device settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Input device node (first USB device with volume keys when unset)
    pub device: Option<PathBuf>,
    /// Wait between device lookups while no device is present
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { device: None, retry_interval_ms: default_retry_interval_ms() }
    }
}

fn default_retry_interval_ms() -> u64 {
    1000
}

/// Volume settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Percentage change per key press
    #[serde(default = "default_step")]
    pub step: u8,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self { step: default_step() }
    }
}

fn default_step() -> u8 {
    VolumeStep::default().percent()
}

/// Power key settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PowerConfig {
    /// Shell command to run when the power key is pressed
    pub command: Option<String>,
}

impl Config {
    /// Override file settings with any flags given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(device) = &cli.alsa_dev {
            self.alsa.device.clone_from(device);
        }
        if let Some(control) = &cli.alsa_ctrl {
            self.alsa.control = Some(control.clone());
        }
        if let Some(device) = &cli.input_dev {
            self.input.device = Some(device.clone());
        }
        if let Some(step) = cli.volume_delta {
            self.volume.step = step.percent();
        }
        if let Some(command) = &cli.power_off_cmd {
            self.power.command = Some(command.clone());
        }
        if let Some(level) = cli.log_level {
            self.daemon.log_level = level;
        }
    }

    /// Build the supervisor settings.
    ///
    /// # Errors
    /// Returns an error if the volume step is not one of the allowed values.
    pub fn supervisor_config(&self) -> Result<SupervisorConfig> {
        let step = VolumeStep::try_from(self.volume.step).context("Invalid [volume] step")?;
        Ok(SupervisorConfig {
            alsa_device: self.alsa.device.clone(),
            alsa_control: self.alsa.control.clone(),
            input_device: self.input.device.clone(),
            step,
            retry_interval: Duration::from_millis(self.input.retry_interval_ms),
        })
    }
}

/// Load configuration from `explicit`, the default config file, or defaults.
///
/// An explicitly named file must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let config_path = config_path()?;
    if config_path.exists() {
        load_config_from(&config_path)
    } else {
        info!(?config_path, "Config file not found, using defaults");
        Ok(Config::default())
    }
}

/// Load configuration from a TOML file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {path:?}"))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {path:?}"))?;
    Ok(config)
}

/// Get the configuration file path.
fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "volknob", "volknob")
        .context("Could not determine config directory")?;
    Ok(dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write config");
        file
    }

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.alsa.device, "default");
        assert!(config.alsa.control.is_none());
        assert!(config.input.device.is_none());
        assert_eq!(config.volume.step, 10);
        assert!(config.power.command.is_none());
        assert_eq!(config.daemon.log_level, LogLevel::Info);

        let supervisor = config.supervisor_config().expect("Valid defaults");
        assert_eq!(supervisor.retry_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_load_full_file() {
        let file = write_config(
            r#"
            [daemon]
            log_level = "debug"

            [alsa]
            device = "hw:1"
            control = "Speaker"

            [input]
            device = "/dev/input/event3"
            retry_interval_ms = 250

            [volume]
            step = 5

            [power]
            command = "systemctl poweroff"
            "#,
        );

        let config = load_config(Some(file.path())).expect("Failed to load config");

        assert_eq!(config.daemon.log_level, LogLevel::Debug);
        assert_eq!(config.alsa.device, "hw:1");
        assert_eq!(config.alsa.control.as_deref(), Some("Speaker"));
        assert_eq!(config.input.device, Some(PathBuf::from("/dev/input/event3")));
        assert_eq!(config.input.retry_interval_ms, 250);
        assert_eq!(config.volume.step, 5);
        assert_eq!(config.power.command.as_deref(), Some("systemctl poweroff"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[alsa]\ncontrol = \"PCM\"\n");
        let config = load_config_from(file.path()).expect("Failed to load config");

        assert_eq!(config.alsa.device, "default");
        assert_eq!(config.alsa.control.as_deref(), Some("PCM"));
        assert_eq!(config.volume, VolumeConfig::default());
        assert_eq!(config.input, InputConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = write_config("[volume]\nstep = \"loud\"\n");
        assert!(load_config_from(file.path()).is_err());
    }

    #[test]
    fn test_invalid_step_rejected() {
        let file = write_config("[volume]\nstep = 12\n");
        let config = load_config_from(file.path()).expect("Failed to load config");
        assert!(config.supervisor_config().is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_config("[alsa]\ndevice = \"hw:1\"\ncontrol = \"PCM\"\n[volume]\nstep = 5\n");
        let mut config = load_config_from(file.path()).expect("Failed to load config");
        let cli = Cli::try_parse_from(["volknob", "-d", "hw:2", "-v", "20", "-l", "warning"])
            .expect("Failed to parse args");

        config.apply_cli(&cli);

        assert_eq!(config.alsa.device, "hw:2");
        assert_eq!(config.alsa.control.as_deref(), Some("PCM"));
        assert_eq!(config.volume.step, 20);
        assert_eq!(config.daemon.log_level, LogLevel::Warning);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LevelFilter::from(LogLevel::Critical), LevelFilter::ERROR);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::ERROR);
        assert_eq!(LevelFilter::from(LogLevel::Warning), LevelFilter::WARN);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::INFO);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::DEBUG);
    }
}
