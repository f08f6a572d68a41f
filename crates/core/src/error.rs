//! Error types for droid-doctor
//!
//! Centralized error handling using thiserror. Checks never surface these to
//! the orchestrator; they are turned into reports where they occur.

use thiserror::Error;

/// Main error type for droid-doctor
#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("prerequisite {0} is not set")]
    MissingPrerequisite(String),
}

/// Result type alias for droid-doctor operations
pub type Result<T> = std::result::Result<T, DoctorError>;

impl DoctorError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DoctorError::Io(e) => format!("File operation failed: {}", e),
            DoctorError::Config(msg) => format!("Configuration error: {}", msg),
            DoctorError::TomlParse(e) => format!("Invalid configuration file: {}", e),
            DoctorError::MissingPrerequisite(var) => {
                format!("Cannot verify: prerequisite {} is missing", var)
            }
        }
    }
}
