//! Platform Gate
//!
//! The Xcode probes only mean something on macOS. Elsewhere they are skipped
//! without any report.

use droid_doctor_core::{Host, ProcessRunner, Reporter};
use tracing::debug;

use crate::probes::APPLE_PROBES;

/// Runs the Xcode probes when the host is macOS
pub struct PlatformGate<R, H> {
    runner: R,
    host: H,
}

impl<R: ProcessRunner, H: Host> PlatformGate<R, H> {
    pub fn new(runner: R, host: H) -> Self {
        Self { runner, host }
    }

    /// Run every probe in order. Returns how many probes ran.
    pub async fn run(&self, reporter: &impl Reporter) -> usize {
        let os = self.host.os_family();
        if !os.is_mac() {
            debug!("Skipping Xcode probes on {:?}", os);
            return 0;
        }

        for probe in APPLE_PROBES {
            debug!("Running {} probe", probe.name());
            probe.run(&self.runner, &self.host, reporter).await;
        }

        APPLE_PROBES.len()
    }
}
