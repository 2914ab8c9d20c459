//! ALSA simple mixer elements as volknob mixer controls.

use alsa::ctl::Ctl;
use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};
use tracing::debug;

use volknob_core::capability::{MixerCaps, SwitchCap, VolumeCap};
use volknob_core::mixer::{MixerBackend, MixerControl};
use volknob_core::volume::VolumeLevel;

use crate::error::{AlsaError, AlsaResult};

/// Volumes are read from the first channel; writes go to every channel.
const READ_CHANNEL: SelemChannelId = SelemChannelId::FrontLeft;

/// Convert a raw element value to a percentage of its range.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn raw_to_percent(raw: i64, (min, max): (i64, i64)) -> i64 {
    if max <= min {
        return 0;
    }
    ((raw - min) as f64 / (max - min) as f64 * 100.0).round() as i64
}

/// Convert a percentage to a raw element value within its range.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn percent_to_raw(percent: u8, (min, max): (i64, i64)) -> i64 {
    if max <= min {
        return min;
    }
    min + ((max - min) as f64 * f64::from(percent) / 100.0).round() as i64
}

fn caps_of(selem: &Selem<'_>) -> MixerCaps {
    let mut caps = MixerCaps::default();
    if selem.has_playback_volume() {
        caps.volume.push(VolumeCap::PlaybackVolume);
    }
    if selem.has_capture_volume() {
        caps.volume.push(VolumeCap::CaptureVolume);
    }
    if selem.has_playback_switch() {
        caps.switch.push(SwitchCap::PlaybackMute);
    }
    if selem.has_capture_switch() {
        caps.switch.push(SwitchCap::CaptureMute);
    }
    caps
}

fn card_name(device: &str) -> String {
    // Plugin devices without a control interface fall back to the device name
    Ctl::new(device, false)
        .and_then(|ctl| ctl.card_info().and_then(|info| info.get_name().map(str::to_string)))
        .unwrap_or_else(|e| {
            debug!(device, error = %e, "Could not read card info");
            device.to_string()
        })
}

/// One simple mixer element, held open for the life of the daemon.
pub struct AlsaControl {
    mixer: Mixer,
    name: String,
    card_name: String,
    caps: MixerCaps,
    range: (i64, i64),
}

impl AlsaControl {
    /// Open the element `control` (index 0) on `device`.
    ///
    /// # Errors
    /// Returns an error if the device cannot be opened or has no such element.
    pub fn open(device: &str, control: &str) -> AlsaResult<Self> {
        let mixer = Mixer::new(device, false)?;
        let (caps, range) = {
            let selem = mixer
                .find_selem(&SelemId::new(control, 0))
                .ok_or_else(|| AlsaError::ControlNotFound(control.to_string()))?;
            (caps_of(&selem), selem.get_playback_volume_range())
        };

        debug!(device, control, ?range, "Opened ALSA mixer element");
        Ok(Self {
            mixer,
            name: control.to_string(),
            card_name: card_name(device),
            caps,
            range,
        })
    }

    fn selem(&self) -> AlsaResult<Selem<'_>> {
        // Pick up changes made by other mixer clients since the last call
        self.mixer.handle_events()?;
        self.mixer
            .find_selem(&SelemId::new(&self.name, 0))
            .ok_or_else(|| AlsaError::ControlNotFound(self.name.clone()))
    }

    fn switch_selem(&self) -> AlsaResult<Selem<'_>> {
        let selem = self.selem()?;
        if !selem.has_playback_switch() {
            return Err(AlsaError::NoPlaybackSwitch(self.name.clone()));
        }
        Ok(selem)
    }

    fn read_volume(&self) -> AlsaResult<VolumeLevel> {
        let raw = self.selem()?.get_playback_volume(READ_CHANNEL)?;
        Ok(VolumeLevel::clamped(raw_to_percent(raw, self.range)))
    }

    fn write_volume(&self, volume: VolumeLevel) -> AlsaResult<()> {
        let raw = percent_to_raw(volume.percent(), self.range);
        self.selem()?.set_playback_volume_all(raw)?;
        Ok(())
    }

    fn read_muted(&self) -> AlsaResult<bool> {
        // A playback switch is "on" when sound passes through
        Ok(self.switch_selem()?.get_playback_switch(READ_CHANNEL)? == 0)
    }

    fn write_muted(&self, muted: bool) -> AlsaResult<()> {
        self.switch_selem()?.set_playback_switch_all(i32::from(!muted))?;
        Ok(())
    }
}

impl MixerControl for AlsaControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn card_name(&self) -> &str {
        &self.card_name
    }

    fn caps(&self) -> &MixerCaps {
        &self.caps
    }

    fn volume(&mut self) -> volknob_core::Result<VolumeLevel> {
        Ok(self.read_volume()?)
    }

    fn set_volume(&mut self, volume: VolumeLevel) -> volknob_core::Result<()> {
        Ok(self.write_volume(volume)?)
    }

    fn muted(&mut self) -> volknob_core::Result<bool> {
        Ok(self.read_muted()?)
    }

    fn set_muted(&mut self, muted: bool) -> volknob_core::Result<()> {
        Ok(self.write_muted(muted)?)
    }
}

/// Mixer backend over the ALSA simple mixer interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlsaMixerBackend;

impl AlsaMixerBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn list_controls(device: &str) -> AlsaResult<Vec<String>> {
        let mixer = Mixer::new(device, false)?;
        let mut names = Vec::new();
        for elem in mixer.iter() {
            let Some(selem) = Selem::new(elem) else {
                continue;
            };
            let id = selem.get_id();
            names.push(id.get_name()?.to_string());
        }
        debug!(device, count = names.len(), "Listed ALSA mixer controls");
        Ok(names)
    }
}

impl MixerBackend for AlsaMixerBackend {
    type Control = AlsaControl;

    fn control_names(&self, device: &str) -> volknob_core::Result<Vec<String>> {
        Ok(Self::list_controls(device)?)
    }

    fn open(&self, device: &str, control: &str) -> volknob_core::Result<AlsaControl> {
        Ok(AlsaControl::open(device, control)?)
    }
}
