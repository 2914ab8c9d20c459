//! Key event handling for one input connection.

use std::io;

use tracing::{debug, error};

use crate::input::{InputDevice, InputEvent, KeyCode, KeyEvent};
use crate::mixer::MixerControl;
use crate::volume::{VolumeController, VolumeStep};

/// Outcome of handling input.
#[derive(Debug)]
pub enum EventSignal {
    /// Keep reading
    Continue,
    /// The device stopped delivering events
    Disconnected(io::Error),
    /// The power key was pressed
    PoweredOff,
}

/// Maps key presses from one device onto a volume controller.
pub struct EventLoop<'a, C> {
    controller: &'a mut VolumeController<C>,
    step: VolumeStep,
}

impl<'a, C: MixerControl> EventLoop<'a, C> {
    #[must_use]
    pub fn new(controller: &'a mut VolumeController<C>, step: VolumeStep) -> Self {
        Self { controller, step }
    }

    /// Read and handle events until the device fails or power is pressed.
    ///
    /// Never returns [`EventSignal::Continue`].
    pub fn run<D: InputDevice>(&mut self, device: &mut D) -> EventSignal {
        loop {
            let event = match device.next_event() {
                Ok(event) => event,
                Err(e) => return EventSignal::Disconnected(e),
            };

            if let EventSignal::PoweredOff = self.handle(event) {
                return EventSignal::PoweredOff;
            }
        }
    }

    /// Handle a single event.
    pub fn handle(&mut self, event: InputEvent) -> EventSignal {
        let InputEvent::Key(KeyEvent { code, phase }) = event else {
            return EventSignal::Continue;
        };
        if !phase.is_actionable() {
            return EventSignal::Continue;
        }

        debug!(code = code.raw(), key = ?code, "Received key");

        let result = match code {
            KeyCode::VolumeUp => self.controller.adjust(self.step.up()).map(drop),
            KeyCode::VolumeDown => self.controller.adjust(self.step.down()).map(drop),
            KeyCode::Mute => self.controller.toggle_mute(),
            KeyCode::Power => return EventSignal::PoweredOff,
            KeyCode::Other(_) => Ok(()),
        };

        if let Err(e) = result {
            error!(key = ?code, error = %e, "Failed to apply key to mixer");
        }
        EventSignal::Continue
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::capability::{MixerCaps, VolumeCap};
    use crate::input::KeyPhase;
    use crate::testing::{FakeInputDevice, FakeMixer, usb_remote_info};

    fn controller(volume: u8) -> VolumeController<FakeMixer> {
        let caps = MixerCaps { volume: vec![VolumeCap::PlaybackVolume], switch: vec![] };
        VolumeController::new(FakeMixer::new("PCM", caps).with_volume(volume))
    }

    fn step(percent: u8) -> VolumeStep {
        VolumeStep::try_from(percent).expect("Valid step")
    }

    fn key(code: KeyCode, phase: KeyPhase) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, phase))
    }

    #[test]
    fn test_volume_up_press_clamps_at_full() {
        let mut controller = controller(95);
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0"))
            .with_events(vec![key(KeyCode::VolumeUp, KeyPhase::Press)]);

        let signal = EventLoop::new(&mut controller, step(10)).run(&mut device);

        assert_matches!(signal, EventSignal::Disconnected(_));
        assert_eq!(controller.control().level(), 100);
    }

    #[test]
    fn test_release_and_non_key_events_are_ignored() {
        let mut controller = controller(50);
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0")).with_events(vec![
            InputEvent::Other,
            key(KeyCode::VolumeUp, KeyPhase::Release),
            key(KeyCode::Mute, KeyPhase::Release),
            key(KeyCode::Power, KeyPhase::Release),
            key(KeyCode::Other(30), KeyPhase::Press),
        ]);

        let signal = EventLoop::new(&mut controller, step(5)).run(&mut device);

        assert_matches!(signal, EventSignal::Disconnected(_));
        assert_eq!(controller.control().level(), 50);
        assert_eq!(controller.control().volume_writes(), 0);
    }

    #[test]
    fn test_repeat_acts_like_press() {
        let mut controller = controller(50);
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0")).with_events(vec![
            key(KeyCode::VolumeDown, KeyPhase::Press),
            key(KeyCode::VolumeDown, KeyPhase::Repeat),
            key(KeyCode::VolumeDown, KeyPhase::Repeat),
            key(KeyCode::VolumeDown, KeyPhase::Release),
        ]);

        EventLoop::new(&mut controller, step(15)).run(&mut device);

        assert_eq!(controller.control().level(), 5);
    }

    #[test]
    fn test_mute_key_toggles_mute() {
        let mut controller = controller(30);
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0"))
            .with_events(vec![key(KeyCode::Mute, KeyPhase::Press)]);

        EventLoop::new(&mut controller, step(10)).run(&mut device);

        assert_eq!(controller.control().level(), 0);
        assert_eq!(controller.mute_state().stored_volume().percent(), 30);
    }

    #[test]
    fn test_power_stops_before_later_events() {
        let mut controller = controller(30);
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0")).with_events(vec![
            key(KeyCode::Power, KeyPhase::Press),
            key(KeyCode::VolumeUp, KeyPhase::Press),
        ]);

        let signal = EventLoop::new(&mut controller, step(10)).run(&mut device);

        assert_matches!(signal, EventSignal::PoweredOff);
        assert_eq!(controller.control().level(), 30);
    }

    #[test]
    fn test_mixer_failure_does_not_stop_loop() {
        let caps = MixerCaps { volume: vec![VolumeCap::PlaybackVolume], switch: vec![] };
        let mut controller = VolumeController::new(FakeMixer::new("PCM", caps).with_volume(20).failing());
        let mut device = FakeInputDevice::new(usb_remote_info("/dev/input/event0")).with_events(vec![
            key(KeyCode::VolumeUp, KeyPhase::Press),
            key(KeyCode::Power, KeyPhase::Press),
        ]);

        let signal = EventLoop::new(&mut controller, step(10)).run(&mut device);

        assert_matches!(signal, EventSignal::PoweredOff);
    }
}
