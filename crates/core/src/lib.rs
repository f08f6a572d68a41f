//! droid-doctor core - shared capabilities
//!
//! The checks in the toolchain crates depend only on the traits defined here:
//! a [`Reporter`] for output, an [`EnvSource`] for variables, a [`Host`] for
//! OS identification and path existence, and a [`ProcessRunner`] for external
//! commands.

pub mod config;
pub mod env;
pub mod error;
pub mod host;
pub mod process;
pub mod report;

pub use config::DoctorConfig;
pub use env::{EnvSource, MapEnv, SystemEnv, ANDROID_HOME, JAVA_HOME};
pub use error::{DoctorError, Result};
pub use host::{Host, LocalHost, OsFamily, StaticHost};
pub use process::{ProcessError, ProcessOutput, ProcessRunner, ScriptedRunner, TokioRunner};
pub use report::{
    RecordingReporter, Report, Reporter, Severity, Summary, TallyReporter, TracingReporter,
};

/// droid-doctor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "droid-doctor";
