//! Error types for volknob core.

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for volknob operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("No ALSA mixer playback volume control available on device '{0}'")]
    NoMixer(String),

    #[error("Mixer error: {0}")]
    Mixer(String),

    #[error("Input device error at {path:?}: {source}")]
    InputDevice {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input device scan failed: {0}")]
    InputScan(#[source] std::io::Error),

    #[error("Invalid volume step: {0} (must be one of 5, 10, 15, 20, 25)")]
    InvalidVolumeStep(u8),
}

/// Result type alias for volknob core operations.
pub type Result<T> = std::result::Result<T, Error>;
