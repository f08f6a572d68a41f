//! Environment Variable Check
//!
//! Verifies that the home variables the Android and Java tooling depend on
//! are present. A present variable is not reported.

use droid_doctor_core::{EnvSource, Reporter, ANDROID_HOME, JAVA_HOME};
use tracing::debug;

/// Variables that must be set, in reporting order
pub const REQUIRED_VARS: &[&str] = &[JAVA_HOME, ANDROID_HOME];

/// Presence check over an environment source
pub struct EnvironmentCheck<E> {
    env: E,
}

impl<E: EnvSource> EnvironmentCheck<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Check a single variable. Returns whether it is set.
    pub fn check(&self, name: &str, reporter: &impl Reporter) -> bool {
        match self.env.var(name) {
            Some(value) => {
                debug!("{} = {}", name, value);
                true
            }
            None => {
                reporter.error(&format!("{} is NOT set!", name));
                false
            }
        }
    }

    /// Check every required variable
    pub fn check_required(&self, reporter: &impl Reporter) {
        for name in REQUIRED_VARS {
            self.check(name, reporter);
        }
    }
}
