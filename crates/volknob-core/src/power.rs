//! Power-off handling.

use std::process::Command;

use tracing::{debug, error, info, warn};

/// Action taken when the remote's power key is pressed.
#[cfg_attr(test, mockall::automock)]
pub trait PowerOffAction {
    fn power_off(&mut self);
}

/// Runs an optional shell command on power-off.
#[derive(Debug, Clone, Default)]
pub struct ShellCommand {
    command: Option<String>,
}

impl ShellCommand {
    #[must_use]
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }
}

impl PowerOffAction for ShellCommand {
    fn power_off(&mut self) {
        let Some(command) = &self.command else {
            debug!("No power-off command to execute");
            return;
        };

        debug!(command = %command, "Executing power-off command");
        match Command::new("sh").arg("-c").arg(command).status() {
            Ok(status) if status.success() => info!(command = %command, "Power-off command finished"),
            Ok(status) => warn!(command = %command, %status, "Power-off command failed"),
            Err(e) => error!(command = %command, error = %e, "Failed to run power-off command"),
        }
    }
}
