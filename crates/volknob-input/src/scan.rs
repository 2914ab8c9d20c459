//! Input device discovery.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;

use volknob_core::input::InputBackend;

use crate::device::EvdevDevice;

/// Where the kernel exposes input device nodes.
pub const INPUT_DIR: &str = "/dev/input";

fn event_number(path: &Path) -> Option<u32> {
    path.file_name()?.to_str()?.strip_prefix("event")?.parse().ok()
}

/// All `event<N>` nodes in `dir`, ordered by `N`.
///
/// # Errors
/// Returns an error if `dir` cannot be read.
pub fn event_nodes(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut nodes: Vec<(u32, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(number) = event_number(&path) {
            nodes.push((number, path));
        }
    }
    nodes.sort_unstable_by_key(|(number, _)| *number);
    trace!(?dir, count = nodes.len(), "Listed input event nodes");
    Ok(nodes.into_iter().map(|(_, path)| path).collect())
}

/// Input backend over the event nodes in a directory.
#[derive(Debug, Clone)]
pub struct EvdevBackend {
    dir: PathBuf,
}

impl EvdevBackend {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for EvdevBackend {
    fn default() -> Self {
        Self::new(INPUT_DIR)
    }
}

impl InputBackend for EvdevBackend {
    type Device = EvdevDevice;

    fn device_paths(&mut self) -> io::Result<Vec<PathBuf>> {
        event_nodes(&self.dir)
    }

    fn open(&mut self, path: &Path) -> io::Result<EvdevDevice> {
        EvdevDevice::open(path)
    }
}
