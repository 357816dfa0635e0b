//! Checker job runner: derives and executes one trim job.
//!
//! The runner validates the shared context, derives the per-mode
//! command, invokes the tool through the backend, and records the exit
//! status with manifest digests taken around the run.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use trimgate_core::{
    BuildContext, CapturedOutput, CheckerJob, JobRecord, JobStatus, Mode, ToolSpec,
};

use crate::backend::ToolBackend;
use crate::digest;
use crate::RunnerError;

/// Environment variable pointing the tool at the shared artifact stash.
const ARTIFACTS_ENV: &str = "CARGO_TARGET_DIR";

/// Executes checker jobs against a shared build context.
///
/// Stateless across invocations: each call to [`TrimRunner::run`] is a
/// single-shot job that starts, executes, and terminates.
///
/// # Cancel Safety
/// Cancel safe. Dropping the future kills the tool process via the
/// backend's `kill_on_drop`.
pub struct TrimRunner<B: ToolBackend> {
    backend: B,
    tool: ToolSpec,
}

impl<B: ToolBackend> TrimRunner<B> {
    /// Create a runner using the canonical `cargo diet` tool.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tool: ToolSpec::default(),
        }
    }

    /// Create a runner for a custom trimming tool.
    #[must_use]
    pub fn with_tool(backend: B, tool: ToolSpec) -> Self {
        Self { backend, tool }
    }

    /// Run one checker job in the given mode.
    ///
    /// Returns a [`JobRecord`] whenever the tool ran to completion; a
    /// non-zero exit travels inside the record rather than as an error,
    /// since a failing trim check is the tool's report, not a fault of
    /// the runner. Use [`ensure_clean`] to lift a non-zero record into
    /// the gate's error.
    ///
    /// # Errors
    /// Returns [`RunnerError::BuildContext`] if the context fails
    /// validation (checked before anything is spawned),
    /// [`RunnerError::ToolInvocation`] if the tool cannot be resolved
    /// or started, and [`RunnerError::Io`] if the manifest cannot be
    /// read for digesting.
    pub async fn run(
        &self,
        context: &Arc<BuildContext>,
        mode: Mode,
    ) -> Result<JobRecord, RunnerError> {
        context.validate()?;

        let job = CheckerJob::derive(Arc::clone(context), mode, self.tool.clone());
        let tool_path = self.backend.resolve(&job.command.program).await?;
        let manifest = context.manifest_file();

        tracing::debug!(tool = %tool_path.display(), "tool resolved");

        let digest_before = digest::digest_file(&manifest).await?;
        let started_at = Utc::now();
        let wall_start = Instant::now();

        tracing::info!(
            job = %job.id,
            session = %context.session_id,
            mode = %mode,
            command = %job.command,
            "starting trim job"
        );

        let env = artifact_env(context);
        let output = self
            .backend
            .invoke(&job.command, &context.source_root, &env)
            .await?;

        let duration = wall_start.elapsed();
        let digest_after = digest::digest_file(&manifest).await?;
        let mutated = digest_before != digest_after;

        if mode == Mode::DryRun && mutated {
            tracing::warn!(
                job = %job.id,
                "dry-run mutated the manifest; the tool violated its read-only contract"
            );
        }

        tracing::info!(
            job = %job.id,
            exit_code = output.exit_code,
            mutated,
            elapsed_ms = duration.as_millis(),
            "trim job complete"
        );

        Ok(JobRecord::new(
            job.id,
            context.session_id,
            mode,
            started_at,
            duration,
            JobStatus::from_exit_code(output.exit_code),
            digest_before,
            digest_after,
            CapturedOutput::new(output.stdout, output.stderr),
        ))
    }
}

/// Lift a non-zero record into the gate's tool-exit error.
///
/// # Errors
/// Returns [`RunnerError::ToolExit`] carrying the record's exit code
/// and captured output if the tool exited non-zero.
pub fn ensure_clean(record: &JobRecord) -> Result<(), RunnerError> {
    match record.status {
        JobStatus::Succeeded => Ok(()),
        JobStatus::Failed { exit_code } => Err(RunnerError::ToolExit {
            mode: record.mode,
            exit_code,
            output: record.output.clone(),
        }),
    }
}

/// Environment entries handed to the tool: the artifact stash location,
/// when the context carries one.
fn artifact_env(context: &BuildContext) -> Vec<(String, String)> {
    match &context.artifacts {
        Some(stash) => vec![(
            ARTIFACTS_ENV.to_owned(),
            stash.root.display().to_string(),
        )],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use trimgate_core::{ArtifactStash, ToolCommand};

    use super::*;
    use crate::backend::ToolOutput;

    /// Backend that returns a fixed exit code and counts invocations.
    #[derive(Clone)]
    struct ScriptedBackend {
        exit_code: i32,
        invocations: Arc<AtomicUsize>,
    }

    impl ScriptedBackend {
        fn new(exit_code: i32) -> Self {
            Self {
                exit_code,
                invocations: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl ToolBackend for ScriptedBackend {
        async fn invoke(
            &self,
            _command: &ToolCommand,
            _workdir: &Path,
            _env: &[(String, String)],
        ) -> Result<ToolOutput, RunnerError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(ToolOutput::new(
                self.exit_code,
                b"scripted stdout".to_vec(),
                Vec::new(),
            ))
        }

        async fn resolve(&self, program: &str) -> Result<PathBuf, RunnerError> {
            Ok(PathBuf::from(program))
        }
    }

    fn context_in(dir: &Path) -> Arc<BuildContext> {
        std::fs::write(dir.join("Cargo.toml"), b"[package]\nname = \"demo\"\n")
            .expect("write manifest");
        Arc::new(
            BuildContext::new(dir.to_owned())
                .with_artifacts(ArtifactStash::new(dir.join("target"))),
        )
    }

    #[tokio::test]
    async fn run_records_exit_code_and_output() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = context_in(dir.path());
        let runner = TrimRunner::new(ScriptedBackend::new(1));

        let record = runner.run(&context, Mode::DryRun).await.expect("run");

        assert_eq!(record.exit_code(), 1);
        assert_eq!(record.mode, Mode::DryRun);
        assert_eq!(record.session_id, context.session_id);
        assert_eq!(record.output.stdout, b"scripted stdout");
        assert!(
            !record.manifest_mutated(),
            "scripted backend never touches the manifest"
        );
    }

    #[tokio::test]
    async fn run_fails_fast_on_context_without_artifacts() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Cargo.toml"), b"[package]\n")
            .expect("write manifest");
        let context = Arc::new(BuildContext::new(dir.path().to_owned()));
        let backend = ScriptedBackend::new(0);
        let invocations = Arc::clone(&backend.invocations);
        let runner = TrimRunner::new(backend);

        let err = runner.run(&context, Mode::DryRun).await;

        assert!(
            matches!(err, Err(RunnerError::BuildContext(_))),
            "missing artifacts must fail context validation, got {err:?}"
        );
        assert_eq!(
            invocations.load(Ordering::SeqCst),
            0,
            "the tool must never be invoked for an invalid context"
        );
    }

    #[tokio::test]
    async fn run_propagates_missing_manifest_as_io() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = Arc::new(
            BuildContext::new(dir.path().to_owned())
                .with_manifest_path(PathBuf::from("no-such/Cargo.toml"))
                .with_artifacts(ArtifactStash::new(dir.path().join("target"))),
        );
        let runner = TrimRunner::new(ScriptedBackend::new(0));

        let err = runner.run(&context, Mode::DryRun).await;
        assert!(matches!(err, Err(RunnerError::Io(_))), "got {err:?}");
    }

    #[tokio::test]
    async fn artifact_env_points_at_the_stash() {
        let dir = tempfile::tempdir().expect("tempdir");
        let context = context_in(dir.path());
        let env = artifact_env(&context);
        assert_eq!(env.len(), 1);
        assert_eq!(env[0].0, "CARGO_TARGET_DIR");
        assert!(env[0].1.ends_with("target"), "got {}", env[0].1);
    }

    #[test]
    fn ensure_clean_passes_zero_and_lifts_nonzero() {
        use std::time::Duration;
        use trimgate_core::{JobId, ManifestDigest, SessionId};

        let digest = ManifestDigest::new([0u8; 32]);
        let clean = JobRecord::new(
            JobId::new(),
            SessionId::new(),
            Mode::DryRun,
            Utc::now(),
            Duration::from_millis(1),
            JobStatus::Succeeded,
            digest,
            digest,
            CapturedOutput::default(),
        );
        assert!(ensure_clean(&clean).is_ok());

        let dirty = JobRecord::new(
            JobId::new(),
            SessionId::new(),
            Mode::DryRun,
            Utc::now(),
            Duration::from_millis(1),
            JobStatus::Failed { exit_code: 2 },
            digest,
            digest,
            CapturedOutput::new(b"removable: foo".to_vec(), Vec::new()),
        );
        match ensure_clean(&dirty) {
            Err(RunnerError::ToolExit {
                mode,
                exit_code,
                output,
            }) => {
                assert_eq!(mode, Mode::DryRun);
                assert_eq!(exit_code, 2);
                assert_eq!(output.stdout, b"removable: foo");
            }
            other => panic!("expected ToolExit, got {other:?}"),
        }
    }
}
