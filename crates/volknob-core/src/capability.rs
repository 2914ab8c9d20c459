//! Mixer capability tags and the playback volume/mute probes.
//!
//! Tags use the same vocabulary ALSA tools print for a simple mixer element,
//! so a debug dump of a control reads the way `amixer` would describe it.

use std::fmt;

/// A volume capability advertised by a mixer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeCap {
    /// Common volume shared by playback and capture
    Volume,
    /// Common volume, all channels joined
    JoinedVolume,
    /// Playback volume
    PlaybackVolume,
    /// Playback volume, all channels joined
    JoinedPlaybackVolume,
    /// Capture volume
    CaptureVolume,
    /// Capture volume, all channels joined
    JoinedCaptureVolume,
}

impl VolumeCap {
    /// The ALSA name for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::JoinedVolume => "Joined Volume",
            Self::PlaybackVolume => "Playback Volume",
            Self::JoinedPlaybackVolume => "Joined Playback Volume",
            Self::CaptureVolume => "Capture Volume",
            Self::JoinedCaptureVolume => "Joined Capture Volume",
        }
    }
}

impl fmt::Display for VolumeCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A switch capability advertised by a mixer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchCap {
    /// Common switch shared by playback and capture
    Mute,
    /// Common switch, all channels joined
    JoinedMute,
    /// Playback switch
    PlaybackMute,
    /// Playback switch, all channels joined
    JoinedPlaybackMute,
    /// Capture switch
    CaptureMute,
    /// Capture switch, all channels joined
    JoinedCaptureMute,
    /// Capture switch is exclusive within its group
    CaptureExclusive,
}

impl SwitchCap {
    /// The ALSA name for this capability.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mute => "Mute",
            Self::JoinedMute => "Joined Mute",
            Self::PlaybackMute => "Playback Mute",
            Self::JoinedPlaybackMute => "Joined Playback Mute",
            Self::CaptureMute => "Capture Mute",
            Self::JoinedCaptureMute => "Joined Capture Mute",
            Self::CaptureExclusive => "Capture Exclusive",
        }
    }
}

impl fmt::Display for SwitchCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volume capabilities that mean a control can drive playback volume.
pub const PLAYBACK_VOLUME_CAPS: &[VolumeCap] = &[
    VolumeCap::Volume,
    VolumeCap::JoinedVolume,
    VolumeCap::PlaybackVolume,
    VolumeCap::JoinedPlaybackVolume,
];

/// Switch capabilities that mean a control has a native playback mute.
pub const PLAYBACK_MUTE_CAPS: &[SwitchCap] = &[
    SwitchCap::Mute,
    SwitchCap::JoinedMute,
    SwitchCap::PlaybackMute,
    SwitchCap::JoinedPlaybackMute,
];

/// Declared capabilities of one mixer control, in device-reported order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixerCaps {
    /// Volume capability tags
    pub volume: Vec<VolumeCap>,
    /// Switch capability tags
    pub switch: Vec<SwitchCap>,
}

impl MixerCaps {
    /// Whether these capabilities include playback volume.
    #[must_use]
    pub fn supports_playback_volume(&self) -> bool {
        supports_playback_volume(&self.volume)
    }

    /// Whether these capabilities include a native playback mute switch.
    #[must_use]
    pub fn supports_playback_mute(&self) -> bool {
        supports_playback_mute(&self.switch)
    }
}

/// True if any of `caps` is a playback volume capability.
#[must_use]
pub fn supports_playback_volume(caps: &[VolumeCap]) -> bool {
    caps.iter().any(|cap| PLAYBACK_VOLUME_CAPS.contains(cap))
}

/// True if any of `caps` is a playback mute capability.
#[must_use]
pub fn supports_playback_mute(caps: &[SwitchCap]) -> bool {
    caps.iter().any(|cap| PLAYBACK_MUTE_CAPS.contains(cap))
}
