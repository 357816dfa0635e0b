//! Exit-status mapping for the pipeline gate.
//!
//! The job's exit code is the only signal the surrounding pipeline
//! consumes: the wrapped tool's code propagates unchanged, and faults
//! of the gate itself use a code no trimming tool plausibly returns.

use trimgate_runner::RunnerError;

/// Exit code for faults of the gate itself: unresolved tool, malformed
/// context, I/O failure, signal-terminated child.
pub const FAULT_EXIT_CODE: i32 = 70;

/// Map a runner error to the process exit code.
#[must_use]
pub fn exit_code_for(error: &RunnerError) -> i32 {
    match error {
        RunnerError::ToolExit { exit_code, .. } => *exit_code,
        RunnerError::ToolInvocation { .. }
        | RunnerError::BuildContext(_)
        | RunnerError::Io(_) => FAULT_EXIT_CODE,
        _ => FAULT_EXIT_CODE,
    }
}
