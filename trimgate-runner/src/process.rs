//! Process tool backend implementation.
//!
//! Spawns the trimming tool as a child process via `tokio::process`,
//! waits for it to exit, and captures both streams completely. The
//! checker defines no timeout of its own: the surrounding CI scheduler
//! owns build-duration limits, and cancellation propagates through
//! `kill_on_drop`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use trimgate_core::ToolCommand;

use crate::backend::{ToolBackend, ToolOutput};
use crate::RunnerError;

/// Tool backend that runs commands as local child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessBackend;

impl ProcessBackend {
    /// Create a new process backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolBackend for ProcessBackend {
    async fn invoke(
        &self,
        command: &ToolCommand,
        workdir: &Path,
        env: &[(String, String)],
    ) -> Result<ToolOutput, RunnerError> {
        let program = resolve_program(&command.program)?;

        tracing::debug!(
            program = %program.display(),
            workdir = %workdir.display(),
            "spawning trim tool"
        );

        let child = Command::new(&program)
            .args(&command.args)
            .current_dir(workdir)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunnerError::ToolInvocation {
                reason: format!("exec {}: {e}", program.display()),
            })?;

        let output = child.wait_with_output().await?;

        let exit_code = output.status.code().ok_or_else(|| {
            RunnerError::ToolInvocation {
                reason: format!("{} terminated by signal", program.display()),
            }
        })?;

        Ok(ToolOutput::new(exit_code, output.stdout, output.stderr))
    }

    async fn resolve(&self, program: &str) -> Result<PathBuf, RunnerError> {
        resolve_program(program)
    }
}

/// Resolve a program to an on-disk path, via `$PATH` for bare names.
fn resolve_program(program: &str) -> Result<PathBuf, RunnerError> {
    let path = Path::new(program);

    if path.components().count() > 1 {
        // Explicit path, relative or absolute.
        if path.exists() {
            return Ok(path.to_owned());
        }
        return Err(RunnerError::ToolInvocation {
            reason: format!("tool not found at {}", path.display()),
        });
    }

    // Bare name: walk PATH.
    std::env::var("PATH")
        .unwrap_or_default()
        .split(':')
        .map(|dir| Path::new(dir).join(program))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| RunnerError::ToolInvocation {
            reason: format!("tool '{program}' not found in PATH"),
        })
}
