//! Host identification and filesystem existence

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Operating system family of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    /// Family of the running binary
    pub fn current() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else if cfg!(target_os = "macos") {
            OsFamily::MacOs
        } else if cfg!(target_os = "linux") {
            OsFamily::Linux
        } else {
            OsFamily::Other
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }

    pub fn is_mac(&self) -> bool {
        matches!(self, OsFamily::MacOs)
    }
}

/// OS identification plus a filesystem existence primitive
pub trait Host {
    fn os_family(&self) -> OsFamily;

    /// Whether anything (file, directory or symlink target) exists at `path`
    fn exists(&self, path: &Path) -> bool;
}

impl<H: Host + ?Sized> Host for &H {
    fn os_family(&self) -> OsFamily {
        (**self).os_family()
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// The machine we are running on
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalHost;

impl Host for LocalHost {
    fn os_family(&self) -> OsFamily {
        OsFamily::current()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Host with a fixed OS family and a fixed set of existing paths
#[derive(Debug, Clone)]
pub struct StaticHost {
    os: OsFamily,
    paths: HashSet<PathBuf>,
}

impl StaticHost {
    pub fn new(os: OsFamily) -> Self {
        Self {
            os,
            paths: HashSet::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }
}

impl Host for StaticHost {
    fn os_family(&self) -> OsFamily {
        self.os
    }

    fn exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}
