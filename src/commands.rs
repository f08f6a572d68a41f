//! CLI commands for droid-doctor
//!
//! Command-line parsing and the single doctor command it drives.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use droid_doctor_core::{DoctorConfig, Summary};
use tracing::{error, info, warn};

use crate::orchestrator::{CheckSet, SystemDoctor};

/// Check a workstation for mobile automation prerequisites
#[derive(Debug, Parser)]
#[command(name = "droid-doctor", version, about)]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds to wait for each external command
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Exit with status 1 when any error is reported
    #[arg(long, global = true)]
    pub strict: bool,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Commands {
    /// Run every check (default)
    All,
    /// Check JAVA_HOME and ANDROID_HOME only
    Paths,
    /// Check tool binaries and the Xcode toolchain
    Binaries,
}

impl From<Commands> for CheckSet {
    fn from(command: Commands) -> Self {
        match command {
            Commands::All => CheckSet::All,
            Commands::Paths => CheckSet::Paths,
            Commands::Binaries => CheckSet::Binaries,
        }
    }
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub async fn resolve_config(&self) -> Result<DoctorConfig> {
        let loaded = match &self.config {
            Some(path) => DoctorConfig::load_from(path).await,
            None => DoctorConfig::load().await,
        };
        let mut config = loaded.map_err(|err| anyhow::anyhow!(err.user_message()))?;

        if let Some(secs) = self.timeout {
            if secs == 0 {
                anyhow::bail!("--timeout must be greater than zero");
            }
            config.probe_timeout_secs = secs;
        }
        if self.strict {
            config.strict = true;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }

        Ok(config)
    }

    pub fn check_set(&self) -> CheckSet {
        self.command.map(CheckSet::from).unwrap_or_default()
    }
}

/// Doctor command options
pub struct DoctorCommand {
    pub checks: CheckSet,
    pub config: DoctorConfig,
}

impl DoctorCommand {
    /// Run the selected checks and log a summary
    pub async fn execute(&self) -> Summary {
        let doctor = SystemDoctor::system(&self.config);
        doctor.run(self.checks).await;

        let summary = doctor.summary();
        if summary.errors > 0 {
            error!("Doctor finished: {}", summary);
        } else if summary.warnings > 0 {
            warn!("Doctor finished: {}", summary);
        } else {
            info!("Doctor finished: everything looks good");
        }
        summary
    }

    /// Process exit status for a finished run
    pub fn exit_code(&self, summary: &Summary) -> i32 {
        if self.config.strict && !summary.is_healthy() {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subcommand_is_all() {
        let cli = Cli::parse_from(["droid-doctor"]);
        assert_eq!(cli.check_set(), CheckSet::All);

        let cli = Cli::parse_from(["droid-doctor", "paths", "--strict"]);
        assert_eq!(cli.check_set(), CheckSet::Paths);
        assert!(cli.strict);
    }

    #[tokio::test]
    async fn test_overrides_apply_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "probe_timeout_secs = 10\n").await.unwrap();

        let cli = Cli::parse_from([
            "droid-doctor",
            "--config",
            path.to_str().unwrap(),
            "--timeout",
            "3",
            "-v",
        ]);
        let config = cli.resolve_config().await.unwrap();

        assert_eq!(config.probe_timeout_secs, 3);
        assert_eq!(config.log_level, "debug");
        assert!(!config.strict);
    }

    #[tokio::test]
    async fn test_missing_config_file_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let cli = Cli::parse_from(["droid-doctor", "--config", path.to_str().unwrap()]);
        let err = cli.resolve_config().await.unwrap_err();

        assert!(err.to_string().starts_with("File operation failed"));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "").await.unwrap();

        let cli = Cli::parse_from([
            "droid-doctor",
            "--config",
            path.to_str().unwrap(),
            "--timeout",
            "0",
        ]);
        assert!(cli.resolve_config().await.is_err());
    }

    #[test]
    fn test_exit_code() {
        let failing = Summary {
            warnings: 0,
            errors: 1,
        };
        let lenient = DoctorCommand {
            checks: CheckSet::All,
            config: DoctorConfig::default(),
        };
        assert_eq!(lenient.exit_code(&failing), 0);

        let strict = DoctorCommand {
            checks: CheckSet::All,
            config: DoctorConfig {
                strict: true,
                ..Default::default()
            },
        };
        assert_eq!(strict.exit_code(&failing), 1);
        assert_eq!(strict.exit_code(&Summary::default()), 0);
    }
}
