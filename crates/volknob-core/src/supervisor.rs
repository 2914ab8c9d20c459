//! Top-level reconnect loop.
//!
//! The mixer is acquired once. The input device is (re)acquired every time
//! the previous one goes away, until the power key ends the loop.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::Result;
use crate::event_loop::{EventLoop, EventSignal};
use crate::input::{InputBackend, InputDevice, select_input};
use crate::mixer::{MixerBackend, MixerControl, select_mixer};
use crate::power::PowerOffAction;
use crate::volume::{VolumeController, VolumeStep};

/// Default wait between input device lookups.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the supervisor needs to know about the devices to use.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// ALSA device, e.g. "default" or "hw:0"
    pub alsa_device: String,
    /// Mixer control to use; probed when absent
    pub alsa_control: Option<String>,
    /// Input device node to use; probed when absent
    pub input_device: Option<PathBuf>,
    /// Volume change per key press
    pub step: VolumeStep,
    /// Wait between input device lookups
    pub retry_interval: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            alsa_device: "default".to_string(),
            alsa_control: None,
            input_device: None,
            step: VolumeStep::default(),
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

/// Owns the volume controller and keeps an input device attached to it.
pub struct Supervisor<C, I, P> {
    config: SupervisorConfig,
    controller: VolumeController<C>,
    inputs: I,
    power_off: P,
}

impl<C, I, P> Supervisor<C, I, P>
where
    C: MixerControl,
    I: InputBackend,
    P: PowerOffAction,
{
    /// Select the mixer control and build a supervisor around it.
    ///
    /// # Errors
    /// Returns [`crate::Error::NoMixer`] if no usable control is found.
    pub fn acquire<M>(mixers: &M, config: SupervisorConfig, inputs: I, power_off: P) -> Result<Self>
    where
        M: MixerBackend<Control = C>,
    {
        let control = select_mixer(mixers, &config.alsa_device, config.alsa_control.as_deref())?;
        Ok(Self::new(VolumeController::new(control), config, inputs, power_off))
    }

    /// Build a supervisor around an already selected controller.
    #[must_use]
    pub fn new(controller: VolumeController<C>, config: SupervisorConfig, inputs: I, power_off: P) -> Self {
        Self { config, controller, inputs, power_off }
    }

    #[must_use]
    pub fn controller(&self) -> &VolumeController<C> {
        &self.controller
    }

    #[must_use]
    pub fn inputs(&self) -> &I {
        &self.inputs
    }

    /// Run until the power key is pressed, then run the power-off action.
    ///
    /// # Errors
    /// Returns an error if an input device fails in a way that is not a
    /// hot-plug race.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(mut device) = select_input(&mut self.inputs, self.config.input_device.as_deref())? else {
                thread::sleep(self.config.retry_interval);
                continue;
            };

            let signal = EventLoop::new(&mut self.controller, self.config.step).run(&mut device);
            match signal {
                EventSignal::Disconnected(e) => {
                    let info = device.info();
                    info!(path = ?info.path, name = %info.name, "Lost connection to USB HID input device");
                    debug!(error = %e, "Input read error");
                }
                EventSignal::PoweredOff => {
                    info!("Power key received");
                    drop(device);
                    self.power_off.power_off();
                    return Ok(());
                }
                EventSignal::Continue => {}
            }
        }
    }
}
