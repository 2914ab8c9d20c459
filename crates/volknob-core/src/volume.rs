//! Volume levels, volume steps and the volume/mute controller.

use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::mixer::MixerControl;

/// A playback volume as a percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    /// Silence.
    pub const MIN: Self = Self(0);
    /// Full volume.
    pub const MAX: Self = Self(100);

    /// Build a level from any integer, clamping into 0..=100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(percent: i64) -> Self {
        Self(percent.clamp(0, 100) as u8)
    }

    /// The level as a percentage.
    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// This level moved by `delta` percentage points, clamped.
    #[must_use]
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(i64::from(self.0) + i64::from(delta))
    }
}

impl fmt::Display for VolumeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Percentage change applied per volume key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStep(u8);

impl VolumeStep {
    /// Accepted step sizes.
    pub const ALLOWED: [u8; 5] = [5, 10, 15, 20, 25];

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Signed delta for a volume-up press.
    #[must_use]
    pub fn up(self) -> i32 {
        i32::from(self.0)
    }

    /// Signed delta for a volume-down press.
    #[must_use]
    pub fn down(self) -> i32 {
        -i32::from(self.0)
    }
}

impl Default for VolumeStep {
    fn default() -> Self {
        Self(10)
    }
}

impl TryFrom<u8> for VolumeStep {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidVolumeStep(value))
        }
    }
}

/// Saved level for a mixer without a native mute switch.
///
/// A zero stored volume means "not muted"; anything else is the level to
/// restore on unmute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuteState {
    stored_volume: VolumeLevel,
}

impl MuteState {
    #[must_use]
    pub fn stored_volume(&self) -> VolumeLevel {
        self.stored_volume
    }

    /// Whether a simulated mute is in effect.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        !self.stored_volume.is_zero()
    }
}

/// Applies volume steps and mute toggles to one mixer control.
pub struct VolumeController<C> {
    control: C,
    native_mute: bool,
    mute: MuteState,
}

impl<C: MixerControl> VolumeController<C> {
    /// Wrap a selected control. Native mute support is probed once here.
    #[must_use]
    pub fn new(control: C) -> Self {
        let native_mute = control.caps().supports_playback_mute();
        debug!(control = %control.name(), native_mute, "Volume controller ready");
        Self { control, native_mute, mute: MuteState::default() }
    }

    /// The underlying mixer control.
    #[must_use]
    pub fn control(&self) -> &C {
        &self.control
    }

    #[must_use]
    pub fn mute_state(&self) -> MuteState {
        self.mute
    }

    /// Whether mute toggles use the control's own switch.
    #[must_use]
    pub fn has_native_mute(&self) -> bool {
        self.native_mute
    }

    /// Move the volume by `delta` percentage points, clamped to 0..=100.
    ///
    /// # Errors
    /// Returns an error if the mixer cannot be read or written.
    pub fn adjust(&mut self, delta: i32) -> Result<VolumeLevel> {
        let current = self.control.volume()?;
        let new = current.offset(delta);
        debug!(delta, %current, %new, "Volume change");
        self.control.set_volume(new)?;
        Ok(new)
    }

    /// Toggle mute, natively when the control has a switch and by saving and
    /// zeroing the volume otherwise.
    ///
    /// # Errors
    /// Returns an error if the mixer cannot be read or written.
    pub fn toggle_mute(&mut self) -> Result<()> {
        if self.native_mute {
            let current = self.control.muted()?;
            debug!(from = current, to = !current, "Native mute switch change");
            return self.control.set_muted(!current);
        }

        let current = self.control.volume()?;
        let stored = self.mute.stored_volume;

        if stored.is_zero() && !current.is_zero() {
            debug!(%current, "Simulated mute");
            self.mute.stored_volume = current;
            self.control.set_volume(VolumeLevel::MIN)
        } else if !stored.is_zero() && current.is_zero() {
            debug!(restore = %stored, "Simulated unmute");
            self.control.set_volume(stored)?;
            self.mute.stored_volume = VolumeLevel::MIN;
            Ok(())
        } else {
            // Volume was changed behind our back; leave both sides alone.
            debug!(%current, %stored, "Simulated mute toggle ignored");
            Ok(())
        }
    }
}
