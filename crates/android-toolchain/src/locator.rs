//! Binary Locator
//!
//! Resolves where a tool is expected to live under its home directory and
//! reports whether it is there.

use std::path::{Path, PathBuf};

use droid_doctor_core::{
    DoctorError, EnvSource, Host, OsFamily, Reporter, Result, ANDROID_HOME, JAVA_HOME,
};
use tracing::debug;

/// Filename transform applied on the Windows family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsSuffix {
    Exe,
    Bat,
}

impl WindowsSuffix {
    fn as_str(&self) -> &'static str {
        match self {
            WindowsSuffix::Exe => ".exe",
            WindowsSuffix::Bat => ".bat",
        }
    }
}

/// Where a tool lives relative to a home variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Logical name, also the base filename
    pub name: &'static str,
    /// Variable holding the home directory
    pub home_var: &'static str,
    /// Directory between the home and the binary
    pub subdir: Option<&'static str>,
    pub windows_suffix: WindowsSuffix,
}

impl ToolDescriptor {
    /// Filename on the given OS family
    pub fn file_name(&self, os: OsFamily) -> String {
        if os.is_windows() {
            format!("{}{}", self.name, self.windows_suffix.as_str())
        } else {
            self.name.to_string()
        }
    }

    /// `home/subdir/name` with the platform suffix
    pub fn resolve(&self, home: &Path, os: OsFamily) -> PathBuf {
        let base = match self.subdir {
            Some(subdir) => home.join(subdir),
            None => home.to_path_buf(),
        };
        base.join(self.file_name(os))
    }
}

pub const JAVA: ToolDescriptor = ToolDescriptor {
    name: "java",
    home_var: JAVA_HOME,
    subdir: None,
    windows_suffix: WindowsSuffix::Exe,
};

pub const ADB: ToolDescriptor = ToolDescriptor {
    name: "adb",
    home_var: ANDROID_HOME,
    subdir: Some("platform-tools"),
    windows_suffix: WindowsSuffix::Exe,
};

pub const ANDROID: ToolDescriptor = ToolDescriptor {
    name: "android",
    home_var: ANDROID_HOME,
    subdir: Some("tools"),
    windows_suffix: WindowsSuffix::Bat,
};

pub const EMULATOR: ToolDescriptor = ToolDescriptor {
    name: "emulator",
    home_var: ANDROID_HOME,
    subdir: Some("tools"),
    windows_suffix: WindowsSuffix::Exe,
};

/// Tools checked by a doctor run, in reporting order
pub const REQUIRED_TOOLS: &[ToolDescriptor] = &[JAVA, ADB, ANDROID, EMULATOR];

/// Locates tool binaries under their home directories
pub struct BinaryLocator<E, H> {
    env: E,
    host: H,
}

impl<E: EnvSource, H: Host> BinaryLocator<E, H> {
    pub fn new(env: E, host: H) -> Self {
        Self { env, host }
    }

    /// Expected path of `tool`, or an error when its home variable is unset
    pub fn expected_path(&self, tool: &ToolDescriptor) -> Result<PathBuf> {
        let home = self
            .env
            .var(tool.home_var)
            .ok_or_else(|| DoctorError::MissingPrerequisite(tool.home_var.to_string()))?;
        Ok(tool.resolve(Path::new(&home), self.host.os_family()))
    }

    /// Check one tool and report the outcome. Returns the path when found.
    pub fn locate(&self, tool: &ToolDescriptor, reporter: &impl Reporter) -> Option<PathBuf> {
        let path = match self.expected_path(tool) {
            Ok(path) => path,
            Err(err) => {
                reporter.error(&format!("Cannot verify {}: {}", tool.name, err));
                return None;
            }
        };

        debug!("Looking for {} at {:?}", tool.name, path);

        if self.host.exists(&path) {
            reporter.info(&format!("{} exists at: {}", tool.name, path.display()));
            Some(path)
        } else {
            reporter.error(&format!(
                "{} could NOT be found at '{}'!",
                tool.name,
                path.display()
            ));
            None
        }
    }

    /// Check every required tool in order
    pub fn locate_required(&self, reporter: &impl Reporter) {
        for tool in REQUIRED_TOOLS {
            self.locate(tool, reporter);
        }
    }
}
