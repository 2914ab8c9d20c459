//! Mixer backend traits and control selection.

use tracing::{debug, error, info};

use crate::capability::MixerCaps;
use crate::error::{Error, Result};
use crate::volume::VolumeLevel;

/// One mixer control on one audio device.
pub trait MixerControl {
    /// Control name, e.g. "Master" or "PCM".
    fn name(&self) -> &str;

    /// Name of the sound card the control lives on.
    fn card_name(&self) -> &str;

    /// Declared capabilities of the control.
    fn caps(&self) -> &MixerCaps;

    /// Current playback volume, read from the first channel.
    ///
    /// # Errors
    /// Returns an error if the mixer cannot be read.
    fn volume(&mut self) -> Result<VolumeLevel>;

    /// Set the playback volume on every channel.
    ///
    /// # Errors
    /// Returns an error if the mixer cannot be written.
    fn set_volume(&mut self, volume: VolumeLevel) -> Result<()>;

    /// Whether the native playback switch is currently muted.
    ///
    /// # Errors
    /// Returns an error if the control has no switch or cannot be read.
    fn muted(&mut self) -> Result<bool>;

    /// Set the native playback switch on every channel.
    ///
    /// # Errors
    /// Returns an error if the control has no switch or cannot be written.
    fn set_muted(&mut self, muted: bool) -> Result<()>;
}

/// Access to the mixer controls of an audio device.
pub trait MixerBackend {
    type Control: MixerControl;

    /// Names of every control on `device`, in the order the device reports them.
    ///
    /// # Errors
    /// Returns an error if the device cannot be opened.
    fn control_names(&self, device: &str) -> Result<Vec<String>>;

    /// Open one named control on `device`.
    ///
    /// # Errors
    /// Returns an error if the device or control cannot be opened.
    fn open(&self, device: &str, control: &str) -> Result<Self::Control>;
}

/// Find the mixer control to drive.
///
/// With an explicit `control`, only that control is considered. Otherwise the
/// first control on `device` that supports playback volume wins. Every
/// backend failure is logged and reported as [`Error::NoMixer`].
///
/// # Errors
/// Returns [`Error::NoMixer`] when no usable control is found.
pub fn select_mixer<B: MixerBackend>(
    backend: &B,
    device: &str,
    control: Option<&str>,
) -> Result<B::Control> {
    let selected = match control {
        Some(name) => open_named(backend, device, name),
        None => probe_first(backend, device),
    };

    match selected {
        Ok(Some(control)) => {
            log_control(&control);
            info!(
                control = %control.name(),
                card = %control.card_name(),
                "Using ALSA mixer for playback volume control"
            );
            Ok(control)
        }
        Ok(None) => Err(Error::NoMixer(device.to_string())),
        Err(e) => {
            error!(error = %e, device, "Mixer lookup failed");
            Err(Error::NoMixer(device.to_string()))
        }
    }
}

fn open_named<B: MixerBackend>(backend: &B, device: &str, name: &str) -> Result<Option<B::Control>> {
    let control = backend.open(device, name)?;
    if control.caps().supports_playback_volume() {
        Ok(Some(control))
    } else {
        error!(
            control = %control.name(),
            card = %control.card_name(),
            "ALSA mixer does not support playback volume control"
        );
        Ok(None)
    }
}

fn probe_first<B: MixerBackend>(backend: &B, device: &str) -> Result<Option<B::Control>> {
    for name in backend.control_names(device)? {
        let control = backend.open(device, &name)?;
        if control.caps().supports_playback_volume() {
            return Ok(Some(control));
        }
        debug!(control = %name, "Skipping mixer control without playback volume");
    }
    Ok(None)
}

fn log_control<C: MixerControl>(control: &C) {
    let caps = control.caps();
    let volume: Vec<_> = caps.volume.iter().map(|c| c.as_str()).collect();
    let switch: Vec<_> = caps.switch.iter().map(|c| c.as_str()).collect();
    debug!(
        control = %control.name(),
        card = %control.card_name(),
        volume_caps = ?volume,
        switch_caps = ?switch,
        "Mixer control capabilities"
    );
}
