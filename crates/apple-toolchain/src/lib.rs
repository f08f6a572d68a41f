//! Xcode toolchain probes
//!
//! Shell-based checks for the iOS side of a mobile automation setup. They
//! only run on macOS; see [`PlatformGate`].

pub mod gate;
pub mod probe;
pub mod probes;

pub use gate::PlatformGate;
pub use probe::{Marker, MarkerProbe, PathProbe, Probe};
pub use probes::APPLE_PROBES;
