//! Checker jobs and the per-mode command derivation.
//!
//! The source of truth here is one constructor taking a [`Mode`]: the
//! dry-run and apply variants differ only in the derived command line,
//! never in the context they run against.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::BuildContext;
use crate::id::JobId;

/// The two invocation modes of the trim checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Analysis-only: report superfluous manifest entries, mutate nothing.
    DryRun,
    /// Mutating: rewrite the manifest in place to its minimal form.
    Apply,
}

impl Mode {
    /// The surface name of this mode (`check` / `apply`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::DryRun => "check",
            Mode::Apply => "apply",
        }
    }

    /// Whether this mode may rewrite the manifest.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(self, Mode::Apply)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external trimming tool as a value: program plus the fixed
/// per-mode argument templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ToolSpec {
    /// Program to execute (bare name for `$PATH` lookup or full path).
    pub program: String,
    /// Arguments present in both modes.
    pub base_args: Vec<String>,
    /// Flag appended only in [`Mode::DryRun`].
    pub dry_run_flag: String,
}

impl ToolSpec {
    /// Create a spec for an arbitrary trimming tool.
    pub fn new(program: impl Into<String>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
            dry_run_flag: "--dry-run".to_owned(),
        }
    }

    /// The canonical tool: `cargo diet`, dry-run via `--dry-run`.
    #[must_use]
    pub fn cargo_diet() -> Self {
        Self::new("cargo", vec!["diet".to_owned()])
    }
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self::cargo_diet()
    }
}

/// A fully derived command line: program and argv, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ToolCommand {
    /// Program to execute.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command from a program and its argv.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One checker invocation: a mode, the command derived for it, and the
/// shared context it runs against.
///
/// Jobs are immutable after derivation and discarded once their process
/// exits. The context is held by `Arc` so a session can hand the same
/// instance to both of its jobs.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CheckerJob {
    /// Unique identifier for this invocation.
    pub id: JobId,
    /// The mode the command was derived for.
    pub mode: Mode,
    /// The derived command line.
    pub command: ToolCommand,
    /// The shared build context.
    pub context: Arc<BuildContext>,
    /// The tool this job injects as an extra dependency.
    pub tool: ToolSpec,
}

impl CheckerJob {
    /// Derive a job from the shared context for the given mode.
    ///
    /// The command line is the tool's base args, the dry-run flag when
    /// `mode` is [`Mode::DryRun`], then the context's build flags in
    /// order.
    #[must_use]
    pub fn derive(context: Arc<BuildContext>, mode: Mode, tool: ToolSpec) -> Self {
        let mut args = tool.base_args.clone();
        if mode == Mode::DryRun {
            args.push(tool.dry_run_flag.clone());
        }
        args.extend(context.build_flags.iter().cloned());

        let command = ToolCommand::new(tool.program.clone(), args);

        Self {
            id: JobId::new(),
            mode,
            command,
            context,
            tool,
        }
    }
}
