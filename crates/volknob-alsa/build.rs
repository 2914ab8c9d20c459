//! Build script for volknob-alsa.
//!
//! Checks that alsa-lib is available.

fn main() {
    if let Err(e) = pkg_config::probe_library("alsa") {
        eprintln!("Warning: alsa not found: {e}");
        eprintln!("Install alsa-lib-devel (Fedora) or libasound2-dev (Debian/Ubuntu)");
        // Don't fail the build here; alsa-sys reports the link error itself
    }
}
