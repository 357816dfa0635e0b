//! Tool backend abstraction trait.
//!
//! Allows substituting the real process backend with scripted backends
//! in tests without changing the runner logic.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use trimgate_core::ToolCommand;

use crate::RunnerError;

/// Exit code and captured streams of one completed tool process.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ToolOutput {
    /// The process exit code.
    pub exit_code: i32,
    /// Everything written to stdout.
    pub stdout: Vec<u8>,
    /// Everything written to stderr.
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Create an output record from a completed process.
    #[must_use]
    pub fn new(exit_code: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }
}

/// Executor for derived tool commands.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Cancel Safety
/// All methods are cancel safe. Dropping the future must not leave a
/// stray child process behind.
#[async_trait]
pub trait ToolBackend: Send + Sync {
    /// Run `command` with `workdir` as working directory and `env` as
    /// extra environment, waiting for it to exit and capturing both
    /// streams completely.
    ///
    /// # Errors
    /// Returns [`RunnerError::ToolInvocation`] if the program cannot be
    /// resolved, cannot be spawned, or was terminated by a signal.
    async fn invoke(
        &self,
        command: &ToolCommand,
        workdir: &Path,
        env: &[(String, String)],
    ) -> Result<ToolOutput, RunnerError>;

    /// Check that `program` is reachable, returning its resolved path.
    ///
    /// # Errors
    /// Returns [`RunnerError::ToolInvocation`] if the program cannot be
    /// found.
    async fn resolve(&self, program: &str) -> Result<PathBuf, RunnerError>;
}
