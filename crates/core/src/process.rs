//! Process Runner
//!
//! Runs external commands and captures their standard output. Failures come
//! back as [`ProcessError`] values so callers branch on them instead of
//! unwinding.

use std::collections::HashMap;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::process::Command;
use tracing::debug;

/// Default upper bound for a single external command
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Process runner errors
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

/// Captured result of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// First line of stdout without surrounding whitespace
    pub fn first_line(&self) -> &str {
        self.stdout.lines().next().unwrap_or("").trim()
    }
}

/// Executes a named command with arguments
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ProcessOutput, ProcessError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ProcessOutput, ProcessError> {
        (**self).run(program, args).await
    }
}

/// Runner backed by `tokio::process` with a per-command timeout
#[derive(Debug, Clone)]
pub struct TokioRunner {
    timeout: Duration,
}

impl TokioRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ProcessRunner for TokioRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<ProcessOutput, ProcessError> {
        let resolved =
            which::which(program).map_err(|_| ProcessError::NotFound(program.to_string()))?;

        debug!("{} {:?} (resolved to {:?})", program, args, resolved);

        // The child is killed when the output future is dropped on timeout.
        let pending = Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, pending).await {
            Ok(result) => result.map_err(|source| ProcessError::Spawn {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(ProcessError::Timeout {
                    program: program.to_string(),
                    timeout: self.timeout,
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            debug!("{} failed: {}", program, stderr.trim());
            return Err(ProcessError::Failed {
                program: program.to_string(),
                status: describe_status(output.status),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ProcessOutput { stdout, stderr })
    }
}

#[derive(Debug, Clone)]
enum Answer {
    Stdout(String),
    Stderr(String),
    SpawnError,
    Timeout,
}

/// Runner answering from a fixed script and recording every invocation.
/// Programs without a scripted answer behave as not installed.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `program` exits successfully printing `stdout`
    pub fn succeed(mut self, program: &str, stdout: &str) -> Self {
        self.answers.insert(program.to_string(), Answer::Stdout(stdout.to_string()));
        self
    }

    /// `program` exits with a failure status printing `stderr`
    pub fn fail(mut self, program: &str, stderr: &str) -> Self {
        self.answers.insert(program.to_string(), Answer::Stderr(stderr.to_string()));
        self
    }

    /// `program` is installed but cannot be started
    pub fn spawn_error(mut self, program: &str) -> Self {
        self.answers.insert(program.to_string(), Answer::SpawnError);
        self
    }

    /// `program` never finishes within [`DEFAULT_TIMEOUT`]
    pub fn time_out(mut self, program: &str) -> Self {
        self.answers.insert(program.to_string(), Answer::Timeout);
        self
    }

    /// Invoked programs in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl ProcessRunner for ScriptedRunner {
    async fn run(&self, program: &str, _args: &[&str]) -> Result<ProcessOutput, ProcessError> {
        self.calls.lock().push(program.to_string());
        match self.answers.get(program) {
            Some(Answer::Stdout(stdout)) => Ok(ProcessOutput::new(stdout.as_str())),
            Some(Answer::Stderr(stderr)) => Err(ProcessError::Failed {
                program: program.to_string(),
                status: "exit code 1".to_string(),
                stderr: stderr.clone(),
            }),
            Some(Answer::SpawnError) => Err(ProcessError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "not executable"),
            }),
            Some(Answer::Timeout) => Err(ProcessError::Timeout {
                program: program.to_string(),
                timeout: DEFAULT_TIMEOUT,
            }),
            None => Err(ProcessError::NotFound(program.to_string())),
        }
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit code {}", code),
        None => "a signal".to_string(),
    }
}
