//! External Tool Probe
//!
//! A probe runs one command and decides from its output whether the tool is
//! usable. Runner failures are folded into the probe's failure report, so a
//! probe always emits exactly one message and never propagates an error.
//!
//! Markers match free-form tool output. They are known to be fragile across
//! tool versions and locales, which is why each one is a named constant in
//! [`crate::probes`].

use std::collections::HashMap;
use std::path::Path;

use droid_doctor_core::{Host, ProcessRunner, Reporter, Severity};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use tracing::debug;

/// Compiled marker patterns keyed by source. Invalid patterns are cached as `None`.
static COMPILED: Lazy<Mutex<HashMap<&'static str, Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &'static str) -> Option<Regex> {
    COMPILED
        .lock()
        .entry(pattern)
        .or_insert_with(|| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                debug!("Invalid marker pattern {:?}: {}", pattern, err);
                None
            }
        })
        .clone()
}

/// Success criterion for a probe's stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Plain substring
    Literal(&'static str),
    /// Regular expression searched anywhere in the output
    Pattern(&'static str),
}

impl Marker {
    pub fn matches(&self, output: &str) -> bool {
        match self {
            Marker::Literal(needle) => output.contains(needle),
            Marker::Pattern(pattern) => compiled(*pattern).is_some_and(|re| re.is_match(output)),
        }
    }
}

/// Probe whose command prints a path that must exist
#[derive(Debug, Clone, Copy)]
pub struct PathProbe {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub severity: Severity,
    /// Reported when the command fails or prints nothing
    pub not_installed: &'static str,
    pub found: fn(&str) -> String,
    pub missing: fn(&str) -> String,
}

/// Probe whose output must contain a marker
#[derive(Debug, Clone, Copy)]
pub struct MarkerProbe {
    pub name: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub marker: Marker,
    pub severity: Severity,
    pub success: &'static str,
    pub failure: &'static str,
}

/// Any external tool probe
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    Path(PathProbe),
    Marker(MarkerProbe),
}

impl Probe {
    pub fn name(&self) -> &'static str {
        match self {
            Probe::Path(p) => p.name,
            Probe::Marker(p) => p.name,
        }
    }

    /// Run the probe and report once. Returns whether it passed.
    pub async fn run(
        &self,
        runner: &impl ProcessRunner,
        host: &impl Host,
        reporter: &impl Reporter,
    ) -> bool {
        match self {
            Probe::Path(probe) => probe.run(runner, host, reporter).await,
            Probe::Marker(probe) => probe.run(runner, reporter).await,
        }
    }
}

impl PathProbe {
    pub async fn run(
        &self,
        runner: &impl ProcessRunner,
        host: &impl Host,
        reporter: &impl Reporter,
    ) -> bool {
        let path = match runner.run(self.program, self.args).await {
            Ok(output) => output.first_line().to_string(),
            Err(err) => {
                debug!("{} probe: {}", self.name, err);
                reporter.report(self.severity, self.not_installed);
                return false;
            }
        };

        if path.is_empty() {
            reporter.report(self.severity, self.not_installed);
            return false;
        }

        if host.exists(Path::new(&path)) {
            reporter.info(&(self.found)(&path));
            true
        } else {
            reporter.report(self.severity, &(self.missing)(&path));
            false
        }
    }
}

impl MarkerProbe {
    pub async fn run(&self, runner: &impl ProcessRunner, reporter: &impl Reporter) -> bool {
        // A failed command counts as empty output.
        let stdout = match runner.run(self.program, self.args).await {
            Ok(output) => output.stdout,
            Err(err) => {
                debug!("{} probe: {}", self.name, err);
                String::new()
            }
        };

        if self.marker.matches(&stdout) {
            reporter.info(self.success);
            true
        } else {
            reporter.report(self.severity, self.failure);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droid_doctor_core::{OsFamily, RecordingReporter, Report, ScriptedRunner, StaticHost};

    const ECHO: MarkerProbe = MarkerProbe {
        name: "echo",
        program: "echo-tool",
        args: &[],
        marker: Marker::Literal("ready"),
        severity: Severity::Error,
        success: "echo is ready",
        failure: "echo is NOT ready",
    };

    fn found(path: &str) -> String {
        format!("tool at {}", path)
    }

    fn missing(path: &str) -> String {
        format!("tool missing at {}", path)
    }

    const LOCATE: PathProbe = PathProbe {
        name: "locate",
        program: "locate-tool",
        args: &[],
        severity: Severity::Warning,
        not_installed: "tool is not installed",
        found,
        missing,
    };

    #[test]
    fn test_marker_matching() {
        assert!(Marker::Literal("enabled").matches("Developer mode is currently enabled."));
        assert!(!Marker::Literal("enabled").matches(""));
        assert!(Marker::Pattern("is-developer|allow").matches("<string>allow</string>"));
        assert!(!Marker::Pattern("is-developer|allow").matches("<string>deny</string>"));
        assert!(!Marker::Pattern("(").matches("("));
    }

    #[test]
    fn test_pattern_compiled_once() {
        let marker = Marker::Pattern(r"^ready\b");
        assert!(marker.matches("ready now"));
        assert!(!marker.matches("not ready"));

        let cache = COMPILED.lock();
        assert!(cache.get(r"^ready\b").is_some_and(Option::is_some));
        assert!(!cache.contains_key(r"^never-used$"));
    }

    #[tokio::test]
    async fn test_marker_present() {
        let runner = ScriptedRunner::new().succeed("echo-tool", "all ready\n");
        let reporter = RecordingReporter::new();

        assert!(ECHO.run(&runner, &reporter).await);
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_marker_absent() {
        let runner = ScriptedRunner::new().succeed("echo-tool", "not yet\n");
        let reporter = RecordingReporter::new();

        assert!(!ECHO.run(&runner, &reporter).await);
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, "echo is NOT ready");
    }

    #[tokio::test]
    async fn test_runner_failure_is_single_report() {
        let runner = ScriptedRunner::new();
        let reporter = RecordingReporter::new();

        assert!(!ECHO.run(&runner, &reporter).await);
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Error);
        assert_eq!(reports[0].message, "echo is NOT ready");
    }

    #[tokio::test]
    async fn test_spawn_error_and_timeout_report_once() {
        let host = StaticHost::new(OsFamily::MacOs);
        let runners = [
            ScriptedRunner::new()
                .spawn_error("echo-tool")
                .spawn_error("locate-tool"),
            ScriptedRunner::new()
                .time_out("echo-tool")
                .time_out("locate-tool"),
        ];

        for runner in &runners {
            let reporter = RecordingReporter::new();
            assert!(!ECHO.run(runner, &reporter).await);
            assert_eq!(
                reporter.reports(),
                vec![Report {
                    severity: Severity::Error,
                    message: "echo is NOT ready".to_string(),
                }]
            );

            let reporter = RecordingReporter::new();
            assert!(!LOCATE.run(runner, &host, &reporter).await);
            assert_eq!(
                reporter.reports(),
                vec![Report {
                    severity: Severity::Warning,
                    message: "tool is not installed".to_string(),
                }]
            );
        }
    }

    #[tokio::test]
    async fn test_path_probe_found() {
        let runner = ScriptedRunner::new().succeed("locate-tool", "/opt/tool\n");
        let host = StaticHost::new(OsFamily::MacOs).with_path("/opt/tool");
        let reporter = RecordingReporter::new();

        assert!(LOCATE.run(&runner, &host, &reporter).await);
        assert_eq!(reporter.reports()[0].message, "tool at /opt/tool");
    }

    #[tokio::test]
    async fn test_path_probe_missing_path() {
        let runner = ScriptedRunner::new().succeed("locate-tool", "/opt/tool\n");
        let host = StaticHost::new(OsFamily::MacOs);
        let reporter = RecordingReporter::new();

        assert!(!LOCATE.run(&runner, &host, &reporter).await);
        let reports = reporter.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Warning);
        assert_eq!(reports[0].message, "tool missing at /opt/tool");
    }

    #[tokio::test]
    async fn test_path_probe_empty_output() {
        let runner = ScriptedRunner::new().succeed("locate-tool", "\n");
        let host = StaticHost::new(OsFamily::MacOs);
        let reporter = RecordingReporter::new();

        assert!(!LOCATE.run(&runner, &host, &reporter).await);
        assert_eq!(reporter.reports()[0].message, "tool is not installed");
    }

    #[tokio::test]
    async fn test_probe_dispatch() {
        let runner = ScriptedRunner::new();
        let host = StaticHost::new(OsFamily::MacOs);
        let reporter = RecordingReporter::new();

        let probe = Probe::Path(LOCATE);
        assert_eq!(probe.name(), "locate");
        assert!(!probe.run(&runner, &host, &reporter).await);
        assert_eq!(reporter.with_severity(Severity::Warning).len(), 1);
    }
}
