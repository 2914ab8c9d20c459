//! In-memory mixer and input fakes for unit tests.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

use crate::capability::MixerCaps;
use crate::error::{Error, Result};
use crate::input::{BUS_USB, InputBackend, InputDevice, InputEvent, InputInfo, KeyCode};
use crate::mixer::{MixerBackend, MixerControl};
use crate::volume::VolumeLevel;

#[derive(Debug, Clone)]
pub struct FakeMixer {
    name: String,
    caps: MixerCaps,
    volume: u8,
    switch_muted: bool,
    volume_writes: usize,
    failing: bool,
}

impl FakeMixer {
    pub fn new(name: &str, caps: MixerCaps) -> Self {
        Self {
            name: name.to_string(),
            caps,
            volume: 50,
            switch_muted: false,
            volume_writes: 0,
            failing: false,
        }
    }

    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    /// Every read and write fails.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn level(&self) -> u8 {
        self.volume
    }

    pub fn volume_writes(&self) -> usize {
        self.volume_writes
    }

    pub fn is_switch_muted(&self) -> bool {
        self.switch_muted
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(Error::Mixer(format!("{} is unavailable", self.name)));
        }
        Ok(())
    }

    fn check_switch(&self) -> Result<()> {
        self.check()?;
        if self.caps.switch.is_empty() {
            return Err(Error::Mixer(format!("{} has no switch", self.name)));
        }
        Ok(())
    }
}

impl MixerControl for FakeMixer {
    fn name(&self) -> &str {
        &self.name
    }

    fn card_name(&self) -> &str {
        "Fake Card"
    }

    fn caps(&self) -> &MixerCaps {
        &self.caps
    }

    fn volume(&mut self) -> Result<VolumeLevel> {
        self.check()?;
        Ok(VolumeLevel::clamped(i64::from(self.volume)))
    }

    fn set_volume(&mut self, volume: VolumeLevel) -> Result<()> {
        self.check()?;
        self.volume = volume.percent();
        self.volume_writes += 1;
        Ok(())
    }

    fn muted(&mut self) -> Result<bool> {
        self.check_switch()?;
        Ok(self.switch_muted)
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.check_switch()?;
        self.switch_muted = muted;
        Ok(())
    }
}

pub struct FakeMixerBackend {
    controls: Vec<FakeMixer>,
    available: bool,
}

impl FakeMixerBackend {
    pub fn new(controls: Vec<FakeMixer>) -> Self {
        Self { controls, available: true }
    }

    /// A device that cannot be opened at all.
    pub fn unavailable() -> Self {
        Self { controls: Vec::new(), available: false }
    }
}

impl MixerBackend for FakeMixerBackend {
    type Control = FakeMixer;

    fn control_names(&self, device: &str) -> Result<Vec<String>> {
        if !self.available {
            return Err(Error::Mixer(format!("cannot open {device}")));
        }
        Ok(self.controls.iter().map(|c| c.name.clone()).collect())
    }

    fn open(&self, device: &str, control: &str) -> Result<FakeMixer> {
        self.controls
            .iter()
            .find(|c| c.name == control)
            .cloned()
            .ok_or_else(|| Error::Mixer(format!("no control {control} on {device}")))
    }
}

/// A remote with all four consumer-control keys on the USB bus.
pub fn usb_remote_info(path: &str) -> InputInfo {
    InputInfo {
        path: PathBuf::from(path),
        name: "USB Remote".to_string(),
        bus_type: BUS_USB,
        keys: [KeyCode::KEY_MUTE, KeyCode::KEY_VOLUMEDOWN, KeyCode::KEY_VOLUMEUP, KeyCode::KEY_POWER]
            .into_iter()
            .collect(),
    }
}

/// Replays queued events, then fails like an unplugged device.
#[derive(Debug, Clone)]
pub struct FakeInputDevice {
    info: InputInfo,
    events: VecDeque<InputEvent>,
}

impl FakeInputDevice {
    pub fn new(info: InputInfo) -> Self {
        Self { info, events: VecDeque::new() }
    }

    pub fn with_events(mut self, events: Vec<InputEvent>) -> Self {
        self.events = events.into();
        self
    }
}

impl InputDevice for FakeInputDevice {
    fn info(&self) -> &InputInfo {
        &self.info
    }

    fn next_event(&mut self) -> io::Result<InputEvent> {
        self.events.pop_front().ok_or_else(|| io::Error::other("No such device"))
    }
}

pub struct FakeInputBackend {
    devices: Vec<FakeInputDevice>,
    replugs: VecDeque<FakeInputDevice>,
    open_errors: HashMap<PathBuf, io::ErrorKind>,
    hidden: usize,
    scans: usize,
    opens: usize,
}

impl FakeInputBackend {
    pub fn new(devices: Vec<FakeInputDevice>) -> Self {
        Self {
            devices,
            replugs: VecDeque::new(),
            open_errors: HashMap::new(),
            hidden: 0,
            scans: 0,
            opens: 0,
        }
    }

    /// The first `scans` enumerations find nothing.
    pub fn hidden_for(mut self, scans: usize) -> Self {
        self.hidden = scans;
        self
    }

    /// After a device is opened, the same node comes back as `device`.
    pub fn then_replug(mut self, device: FakeInputDevice) -> Self {
        self.replugs.push_back(device);
        self
    }

    pub fn with_open_error(mut self, path: &str, kind: io::ErrorKind) -> Self {
        self.open_errors.insert(PathBuf::from(path), kind);
        self
    }

    pub fn scans(&self) -> usize {
        self.scans
    }

    pub fn opens(&self) -> usize {
        self.opens
    }
}

impl InputBackend for FakeInputBackend {
    type Device = FakeInputDevice;

    fn device_paths(&mut self) -> io::Result<Vec<PathBuf>> {
        self.scans += 1;
        if self.hidden > 0 {
            self.hidden -= 1;
            return Ok(Vec::new());
        }
        Ok(self.devices.iter().map(|d| d.info.path.clone()).collect())
    }

    fn open(&mut self, path: &Path) -> io::Result<FakeInputDevice> {
        if let Some(kind) = self.open_errors.get(path) {
            return Err(io::Error::from(*kind));
        }
        let index = self
            .devices
            .iter()
            .position(|d| d.info.path == path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;

        self.opens += 1;
        let device = self.devices[index].clone();
        if let Some(next) = self.replugs.pop_front() {
            self.devices[index] = next;
        }
        Ok(device)
    }
}
