//! volknob core - mixer/input capability probing, volume and mute logic, and
//! the reconnect loop that ties a USB HID remote to an ALSA mixer.
//!
//! The OS device APIs are reached only through the [`MixerBackend`] and
//! [`InputBackend`] traits, implemented by `volknob-alsa` and
//! `volknob-input` respectively.

pub mod capability;
pub mod error;
pub mod event_loop;
pub mod input;
pub mod mixer;
pub mod power;
pub mod supervisor;
pub mod volume;

#[cfg(test)]
pub(crate) mod testing;

pub use capability::{MixerCaps, SwitchCap, VolumeCap};
pub use error::{Error, Result};
pub use event_loop::{EventLoop, EventSignal};
pub use input::{InputBackend, InputDevice, InputEvent, InputInfo, KeyCode, KeyEvent, KeyPhase};
pub use mixer::{MixerBackend, MixerControl};
pub use power::{PowerOffAction, ShellCommand};
pub use supervisor::{Supervisor, SupervisorConfig};
pub use volume::{MuteState, VolumeController, VolumeLevel, VolumeStep};
