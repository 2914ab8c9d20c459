//! evdev-backed input devices.

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use evdev::{Device, InputEventKind};
use tracing::{debug, trace};

use volknob_core::input::{InputDevice, InputEvent, InputInfo, KeyCode, KeyEvent, KeyPhase};

/// Map a raw evdev event onto the core event model.
#[must_use]
pub fn translate(event: &evdev::InputEvent) -> InputEvent {
    match event.kind() {
        InputEventKind::Key(key) => InputEvent::Key(KeyEvent::new(
            KeyCode::from_raw(key.code()),
            KeyPhase::from_value(event.value()),
        )),
        _ => InputEvent::Other,
    }
}

/// An opened `/dev/input/event*` node.
pub struct EvdevDevice {
    device: Device,
    info: InputInfo,
    pending: VecDeque<InputEvent>,
}

impl EvdevDevice {
    /// Open the node at `path` for blocking reads.
    ///
    /// # Errors
    /// Returns an error if the node cannot be opened or queried.
    pub fn open(path: &Path) -> io::Result<Self> {
        let device = Device::open(path)?;
        let info = InputInfo {
            path: path.to_path_buf(),
            name: device.name().unwrap_or_default().to_string(),
            bus_type: device.input_id().bus_type().0,
            keys: device
                .supported_keys()
                .map(|keys| keys.iter().map(|key| key.code()).collect())
                .unwrap_or_default(),
        };

        debug!(
            ?path,
            name = %info.name,
            bus_type = info.bus_type,
            keys = info.keys.len(),
            "Opened input device"
        );
        Ok(Self { device, info, pending: VecDeque::new() })
    }
}

impl InputDevice for EvdevDevice {
    fn info(&self) -> &InputInfo {
        &self.info
    }

    fn next_event(&mut self) -> io::Result<InputEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            // Blocks until the kernel has a full report for us
            let batch = self.device.fetch_events()?;
            self.pending.extend(batch.map(|event| translate(&event)));
            trace!(count = self.pending.len(), "Fetched input events");
        }
    }
}
