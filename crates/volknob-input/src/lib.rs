//! volknob input - USB HID consumer-control devices through evdev.
//!
//! This crate implements the core [`volknob_core::InputBackend`] seam on top
//! of `/dev/input/event*` nodes. Reads block until the kernel delivers an
//! event; an unplugged device surfaces as a read error.

pub mod device;
pub mod scan;

pub use device::EvdevDevice;
pub use scan::{EvdevBackend, event_nodes};
