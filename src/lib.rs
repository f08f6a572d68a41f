//! droid-doctor - mobile automation environment checks
//!
//! Inspects a workstation for what Android and iOS automation needs and
//! reports each finding as a log line. It only observes; nothing is installed
//! or changed.
//!
//! ## Architecture
//!
//! - `droid-doctor-core`: reporter, environment, host and process runner capabilities
//! - `droid-doctor-android`: `JAVA_HOME`/`ANDROID_HOME` and binary location checks
//! - `droid-doctor-apple`: Xcode toolchain probes behind a macOS gate
//!
//! ```no_run
//! use droid_doctor::prelude::*;
//!
//! # async fn run() {
//! let doctor = SystemDoctor::system(&DoctorConfig::default());
//! doctor.path_checks();
//! doctor.binary_checks().await;
//! println!("{}", doctor.summary());
//! # }
//! ```

#![warn(clippy::all)]

pub mod commands;
pub mod orchestrator;

// Re-export main components for library usage
pub use droid_doctor_android as android;
pub use droid_doctor_apple as apple;
pub use droid_doctor_core as common;

pub use orchestrator::{CheckSet, Doctor, SystemDoctor};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::orchestrator::{CheckSet, Doctor, SystemDoctor};
    pub use droid_doctor_core::{
        DoctorConfig, EnvSource, Host, ProcessRunner, Reporter, Severity, Summary,
    };
}
