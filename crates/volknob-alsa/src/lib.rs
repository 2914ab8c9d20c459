//! volknob ALSA - mixer control through alsa-lib.
//!
//! This crate implements the core [`volknob_core::MixerBackend`] seam on top
//! of ALSA simple mixer elements:
//! - Listing the controls of a device in device order
//! - Reporting a control's volume and switch capabilities
//! - Reading and writing playback volume as a percentage
//! - Reading and writing the playback mute switch

pub mod error;
pub mod mixer;

pub use error::{AlsaError, AlsaResult};
pub use mixer::{AlsaControl, AlsaMixerBackend};
