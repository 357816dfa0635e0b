//! Error types for the runner crate.

use trimgate_core::{CapturedOutput, CoreError, Mode};

/// Errors that can occur while running a checker job.
///
/// None of these are retried: a failing trim check is an actionable
/// developer signal, not a transient fault.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RunnerError {
    /// The external tool could not be resolved or started.
    #[error("tool invocation failed: {reason}")]
    ToolInvocation { reason: String },

    /// The shared build context is malformed.
    #[error("invalid build context: {0}")]
    BuildContext(#[from] CoreError),

    /// The wrapped tool ran to completion and exited non-zero.
    ///
    /// Carries the underlying exit code and captured output so the
    /// pipeline can surface the tool's own diagnostics.
    #[error("{mode} job exited with code {exit_code}")]
    ToolExit {
        mode: Mode,
        exit_code: i32,
        output: CapturedOutput,
    },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
