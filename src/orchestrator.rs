//! Doctor Orchestrator
//!
//! Runs the checks in a fixed order. Every check reports its own outcome, so
//! neither entry point can fail and both always run to completion.

use droid_doctor_android::{BinaryLocator, EnvironmentCheck};
use droid_doctor_apple::PlatformGate;
use droid_doctor_core::{
    DoctorConfig, EnvSource, Host, LocalHost, ProcessRunner, Reporter, Summary, SystemEnv,
    TallyReporter, TokioRunner, TracingReporter,
};
use tracing::debug;

/// Doctor wired to the real machine, counting what it reports
pub type SystemDoctor = Doctor<SystemEnv, LocalHost, TokioRunner, TallyReporter<TracingReporter>>;

/// Owns the capabilities every check needs
pub struct Doctor<E, H, R, P> {
    env: E,
    host: H,
    runner: R,
    reporter: P,
}

impl SystemDoctor {
    /// Process environment, local filesystem, tokio processes and tracing output
    pub fn system(config: &DoctorConfig) -> Self {
        Doctor::new(
            SystemEnv,
            LocalHost,
            TokioRunner::new(config.probe_timeout()),
            TallyReporter::new(TracingReporter),
        )
    }
}

impl<E, H, R, P> Doctor<E, H, R, P>
where
    E: EnvSource,
    H: Host,
    R: ProcessRunner,
    P: Reporter,
{
    pub fn new(env: E, host: H, runner: R, reporter: P) -> Self {
        Self {
            env,
            host,
            runner,
            reporter,
        }
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// `JAVA_HOME` then `ANDROID_HOME`
    pub fn path_checks(&self) {
        debug!("Running environment variable checks");
        EnvironmentCheck::new(&self.env).check_required(&self.reporter);
    }

    /// java, adb, android, emulator, then the Xcode probes on macOS
    pub async fn binary_checks(&self) {
        debug!("Running binary checks");
        BinaryLocator::new(&self.env, &self.host).locate_required(&self.reporter);
        PlatformGate::new(&self.runner, &self.host)
            .run(&self.reporter)
            .await;
    }

    pub async fn run(&self, checks: CheckSet) {
        if checks.includes_paths() {
            self.path_checks();
        }
        if checks.includes_binaries() {
            self.binary_checks().await;
        }
    }
}

impl<E, H, R, P> Doctor<E, H, R, TallyReporter<P>>
where
    P: Reporter,
{
    /// Warnings and errors reported so far
    pub fn summary(&self) -> Summary {
        self.reporter.summary()
    }
}

/// Which entry points a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckSet {
    #[default]
    All,
    Paths,
    Binaries,
}

impl CheckSet {
    pub fn includes_paths(&self) -> bool {
        matches!(self, CheckSet::All | CheckSet::Paths)
    }

    pub fn includes_binaries(&self) -> bool {
        matches!(self, CheckSet::All | CheckSet::Binaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droid_doctor_core::{MapEnv, OsFamily, RecordingReporter, ScriptedRunner, StaticHost};

    #[test]
    fn test_check_set() {
        assert!(CheckSet::All.includes_paths() && CheckSet::All.includes_binaries());
        assert!(!CheckSet::Paths.includes_binaries());
        assert!(!CheckSet::Binaries.includes_paths());
    }

    #[tokio::test]
    async fn test_paths_only_skips_binaries() {
        let doctor = Doctor::new(
            MapEnv::new(),
            StaticHost::new(OsFamily::MacOs),
            ScriptedRunner::new(),
            TallyReporter::new(RecordingReporter::new()),
        );

        doctor.run(CheckSet::Paths).await;

        assert_eq!(doctor.summary().errors, 2);
        assert!(doctor.runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_counts_every_failure() {
        let doctor = Doctor::new(
            MapEnv::new(),
            StaticHost::new(OsFamily::MacOs),
            ScriptedRunner::new(),
            TallyReporter::new(RecordingReporter::new()),
        );

        doctor.run(CheckSet::All).await;

        // 2 unset variables, 4 unverifiable binaries, 4 failed probes, carthage warns
        let summary = doctor.summary();
        assert_eq!(summary.errors, 10);
        assert_eq!(summary.warnings, 1);
        assert!(!summary.is_healthy());
    }
}
