//! The Xcode toolchain probes, in the order they run

use droid_doctor_core::Severity;

use crate::probe::{Marker, MarkerProbe, PathProbe, Probe};

/// Package id queried for the Command Line Tools receipt
pub const CLT_PACKAGE: &str = "com.apple.pkg.CLTools_Executables";

/// Present in `pkgutil --pkg-info` output for an installed package
pub const CLT_MARKER: Marker = Marker::Literal("install-time");

/// Printed by `DevToolsSecurity` when developer mode is on
pub const DEV_TOOLS_MARKER: Marker = Marker::Pattern(r"\benabled\b");

/// Rule values that let developer tools attach to processes
pub const TASKPORT_MARKER: Marker = Marker::Pattern("is-developer|allow");

fn carthage_found(path: &str) -> String {
    format!("Carthage was found at: {}", path)
}

fn carthage_missing(_path: &str) -> String {
    "Carthage is not installed".to_string()
}

fn xcode_found(path: &str) -> String {
    format!("Xcode is installed at: {}", path)
}

fn xcode_missing(path: &str) -> String {
    format!("Xcode cannot be found at '{}'!", path)
}

pub const CARTHAGE: Probe = Probe::Path(PathProbe {
    name: "carthage",
    program: "which",
    args: &["carthage"],
    severity: Severity::Warning,
    not_installed: "Carthage is not installed",
    found: carthage_found,
    missing: carthage_missing,
});

pub const XCODE: Probe = Probe::Path(PathProbe {
    name: "xcode",
    program: "xcode-select",
    args: &["--print-path"],
    severity: Severity::Error,
    not_installed: "Xcode is NOT installed!",
    found: xcode_found,
    missing: xcode_missing,
});

pub const COMMAND_LINE_TOOLS: Probe = Probe::Marker(MarkerProbe {
    name: "command line tools",
    program: "pkgutil",
    args: &["--pkg-info=com.apple.pkg.CLTools_Executables"],
    marker: CLT_MARKER,
    severity: Severity::Error,
    success: "Xcode Command Line Tools are installed.",
    failure: "Xcode Command Line Tools are NOT installed. The following command need be executed: xcode-select --install",
});

pub const DEV_TOOLS_SECURITY: Probe = Probe::Marker(MarkerProbe {
    name: "DevToolsSecurity",
    program: "DevToolsSecurity",
    args: &[],
    marker: DEV_TOOLS_MARKER,
    severity: Severity::Error,
    success: "DevToolsSecurity is enabled.",
    failure: "DevToolsSecurity is NOT enabled!",
});

pub const AUTHORIZATION_DB: Probe = Probe::Marker(MarkerProbe {
    name: "authorization db",
    program: "security",
    args: &["authorizationdb", "read", "system.privilege.taskport"],
    marker: TASKPORT_MARKER,
    severity: Severity::Error,
    success: "The Authorization DB is set up properly.",
    failure: "The Authorization DB is NOT set up properly.",
});

/// All probes, in run order
pub const APPLE_PROBES: &[Probe] = &[
    CARTHAGE,
    XCODE,
    COMMAND_LINE_TOOLS,
    DEV_TOOLS_SECURITY,
    AUTHORIZATION_DB,
];
