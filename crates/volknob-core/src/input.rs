//! Input device model, the volume-key probe and device selection.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Linux input bus type for USB devices.
pub const BUS_USB: u16 = 0x03;

/// A key the daemon cares about, by Linux input key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Mute,
    VolumeDown,
    VolumeUp,
    Power,
    /// Any other key
    Other(u16),
}

impl KeyCode {
    pub const KEY_MUTE: u16 = 113;
    pub const KEY_VOLUMEDOWN: u16 = 114;
    pub const KEY_VOLUMEUP: u16 = 115;
    pub const KEY_POWER: u16 = 116;

    #[must_use]
    pub fn from_raw(code: u16) -> Self {
        match code {
            Self::KEY_MUTE => Self::Mute,
            Self::KEY_VOLUMEDOWN => Self::VolumeDown,
            Self::KEY_VOLUMEUP => Self::VolumeUp,
            Self::KEY_POWER => Self::Power,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn raw(self) -> u16 {
        match self {
            Self::Mute => Self::KEY_MUTE,
            Self::VolumeDown => Self::KEY_VOLUMEDOWN,
            Self::VolumeUp => Self::KEY_VOLUMEUP,
            Self::Power => Self::KEY_POWER,
            Self::Other(code) => code,
        }
    }
}

/// Phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Release,
    Press,
    /// Auto-repeat while the key is held
    Repeat,
}

impl KeyPhase {
    /// Map an `EV_KEY` value. Anything but 0 and 2 counts as a press.
    #[must_use]
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => Self::Release,
            2 => Self::Repeat,
            _ => Self::Press,
        }
    }

    /// Whether the event should trigger an action.
    #[must_use]
    pub fn is_actionable(self) -> bool {
        self != Self::Release
    }
}

/// A key event read from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub phase: KeyPhase,
}

impl KeyEvent {
    #[must_use]
    pub fn new(code: KeyCode, phase: KeyPhase) -> Self {
        Self { code, phase }
    }

    #[must_use]
    pub fn press(code: KeyCode) -> Self {
        Self::new(code, KeyPhase::Press)
    }
}

/// One raw event from an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Sync, misc, relative axis and anything else that isn't a key
    Other,
}

/// Static description of an opened input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// Device node path
    pub path: PathBuf,
    /// Device name as reported by the kernel
    pub name: String,
    /// Bus type from the device id
    pub bus_type: u16,
    /// Supported key codes
    pub keys: BTreeSet<u16>,
}

impl InputInfo {
    #[must_use]
    pub fn is_usb(&self) -> bool {
        self.bus_type == BUS_USB
    }
}

/// True if the device advertises the volume-up key.
///
/// Volume-down is not checked separately; devices that report one report both.
#[must_use]
pub fn supports_volume_control(info: &InputInfo) -> bool {
    !info.keys.is_empty() && info.keys.contains(&KeyCode::KEY_VOLUMEUP)
}

/// An opened input device.
pub trait InputDevice {
    fn info(&self) -> &InputInfo;

    /// Block until the next event arrives.
    ///
    /// # Errors
    /// Returns an error when the device can no longer be read, which usually
    /// means it was unplugged.
    fn next_event(&mut self) -> io::Result<InputEvent>;
}

/// Access to the system's input device nodes.
pub trait InputBackend {
    type Device: InputDevice;

    /// Paths of all input device nodes, in enumeration order.
    ///
    /// # Errors
    /// Returns an error if the device directory cannot be read.
    fn device_paths(&mut self) -> io::Result<Vec<PathBuf>>;

    /// Open the device node at `path`.
    ///
    /// # Errors
    /// Returns an error if the node cannot be opened or queried.
    fn open(&mut self, path: &Path) -> io::Result<Self::Device>;
}

/// Not-found and permission errors show up while a USB device is being
/// plugged or unplugged and clear up on their own.
fn is_transient(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied)
}

/// Find the input device to read from.
///
/// `Ok(None)` means nothing usable right now; callers should retry shortly.
///
/// # Errors
/// Returns an error for I/O failures other than not-found or permission denied.
pub fn select_input<B: InputBackend>(backend: &mut B, path: Option<&Path>) -> Result<Option<B::Device>> {
    let device = match path {
        Some(path) => open_explicit(backend, path)?,
        None => probe_first(backend)?,
    };

    if let Some(device) = &device {
        let info = device.info();
        info!(path = ?info.path, name = %info.name, "Using USB HID input device");
    }
    Ok(device)
}

fn open_explicit<B: InputBackend>(backend: &mut B, path: &Path) -> Result<Option<B::Device>> {
    match backend.open(path) {
        Ok(device) => {
            let info = device.info();
            if !supports_volume_control(info) {
                warn!(
                    path = ?info.path,
                    name = %info.name,
                    "Input device does not appear to support volume control events"
                );
            }
            Ok(Some(device))
        }
        Err(e) if is_transient(&e) => {
            debug!(?path, error = %e, "Input device not available");
            Ok(None)
        }
        Err(e) => Err(Error::InputDevice { path: path.to_path_buf(), source: e }),
    }
}

fn probe_first<B: InputBackend>(backend: &mut B) -> Result<Option<B::Device>> {
    let paths = match backend.device_paths() {
        Ok(paths) => paths,
        Err(e) if is_transient(&e) => {
            debug!(error = %e, "Input devices not available");
            return Ok(None);
        }
        Err(e) => return Err(Error::InputScan(e)),
    };

    for path in paths {
        let device = match backend.open(&path) {
            Ok(device) => device,
            Err(e) if is_transient(&e) => {
                debug!(?path, error = %e, "Skipping input device");
                continue;
            }
            Err(e) => return Err(Error::InputDevice { path, source: e }),
        };

        let info = device.info();
        if info.is_usb() && supports_volume_control(info) {
            return Ok(Some(device));
        }
    }

    Ok(None)
}
