//! Check session: the shared-context coordinator for a build session.
//!
//! A session owns the single [`BuildContext`] both modes run against,
//! which is what upholds the core invariant: a check and an apply
//! derived from one session can never be validating different artifact
//! sets.

use std::sync::Arc;

use tokio::sync::Mutex;

use trimgate_core::{BuildContext, JobRecord, Mode};

use crate::backend::ToolBackend;
use crate::runner::TrimRunner;
use crate::RunnerError;

/// Session-scoped coordinator for checker jobs.
///
/// Serializes mutating jobs behind an async lock: an apply never runs
/// concurrently with another mutating job against the same project
/// tree, since it rewrites the manifest in place. Dry-run jobs are
/// read-only and take no lock.
pub struct CheckSession<B: ToolBackend> {
    context: Arc<BuildContext>,
    runner: TrimRunner<B>,
    mutation_lock: Mutex<()>,
    records: Mutex<Vec<JobRecord>>,
}

impl<B: ToolBackend> CheckSession<B> {
    /// Open a session over the given context.
    #[must_use]
    pub fn new(runner: TrimRunner<B>, context: BuildContext) -> Self {
        Self {
            context: Arc::new(context),
            runner,
            mutation_lock: Mutex::new(()),
            records: Mutex::new(Vec::new()),
        }
    }

    /// The shared context every job in this session runs against.
    #[must_use]
    pub fn context(&self) -> &Arc<BuildContext> {
        &self.context
    }

    /// Run an analysis-only job.
    ///
    /// # Errors
    /// Propagates errors from [`TrimRunner::run`].
    pub async fn check(&self) -> Result<JobRecord, RunnerError> {
        self.run(Mode::DryRun).await
    }

    /// Run a mutating job.
    ///
    /// # Errors
    /// Propagates errors from [`TrimRunner::run`].
    pub async fn apply(&self) -> Result<JobRecord, RunnerError> {
        self.run(Mode::Apply).await
    }

    /// Run a job in the given mode and append its record to the session log.
    ///
    /// # Errors
    /// Propagates errors from [`TrimRunner::run`].
    pub async fn run(&self, mode: Mode) -> Result<JobRecord, RunnerError> {
        let _guard = if mode.is_mutating() {
            Some(self.mutation_lock.lock().await)
        } else {
            None
        };

        let record = self.runner.run(&self.context, mode).await?;
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    /// All records of completed jobs, in completion order.
    pub async fn records(&self) -> Vec<JobRecord> {
        self.records.lock().await.clone()
    }

    /// Number of completed jobs in this session.
    pub async fn completed_count(&self) -> usize {
        self.records.lock().await.len()
    }
}
