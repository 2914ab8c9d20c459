//! ALSA error types.

use thiserror::Error;

/// ALSA error type.
#[derive(Debug, Error)]
pub enum AlsaError {
    #[error("ALSA error: {0}")]
    Alsa(#[from] alsa::Error),

    #[error("Mixer control not found: {0}")]
    ControlNotFound(String),

    #[error("Mixer control has no playback switch: {0}")]
    NoPlaybackSwitch(String),
}

/// Result type for ALSA operations.
pub type AlsaResult<T> = Result<T, AlsaError>;

impl From<AlsaError> for volknob_core::Error {
    fn from(e: AlsaError) -> Self {
        Self::Mixer(e.to_string())
    }
}
