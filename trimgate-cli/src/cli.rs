//! Command-line surface for the `trimgate` binary.
//!
//! Two subcommands, one per invocation mode. All options carry
//! `TRIMGATE_*` environment fallbacks so a CI pipeline can configure
//! the gate without touching the command line.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use trimgate_core::{ArtifactStash, BuildContext, Mode, ToolSpec};

use crate::error::CliError;

/// CI gate around a dependency-trimming tool.
#[derive(Debug, Parser)]
#[command(name = "trimgate", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analysis-only: fail when the manifest declares superfluous entries.
    Check(JobArgs),
    /// Rewrite the manifest in place to its minimal form.
    Apply(JobArgs),
}

impl Command {
    /// The checker mode this subcommand maps to.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Command::Check(_) => Mode::DryRun,
            Command::Apply(_) => Mode::Apply,
        }
    }

    /// The job options shared by both subcommands.
    #[must_use]
    pub fn job_args(&self) -> &JobArgs {
        match self {
            Command::Check(args) | Command::Apply(args) => args,
        }
    }
}

/// Options shared by the `check` and `apply` subcommands.
#[derive(Debug, Args)]
pub struct JobArgs {
    /// Root of the project tree the tool runs against.
    #[arg(long, env = "TRIMGATE_SOURCE_ROOT", default_value = ".")]
    pub source_root: PathBuf,

    /// Manifest path, relative to the source root.
    #[arg(long, env = "TRIMGATE_MANIFEST_PATH", default_value = "Cargo.toml")]
    pub manifest_path: PathBuf,

    /// Directory holding the pre-built dependency artifacts.
    #[arg(long, env = "TRIMGATE_ARTIFACTS_DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Artifact fingerprint handed over by the builder.
    #[arg(long, env = "TRIMGATE_ARTIFACTS_FINGERPRINT")]
    pub artifacts_fingerprint: Option<String>,

    /// Load a serialized build context instead of assembling one from flags.
    #[arg(long, env = "TRIMGATE_CONTEXT_FILE")]
    pub context_file: Option<PathBuf>,

    /// Trimming tool program, overriding the default `cargo diet`.
    #[arg(long, env = "TRIMGATE_TOOL_BIN")]
    pub tool_bin: Option<String>,

    /// Extra flag forwarded verbatim to the tool (repeatable).
    #[arg(long = "build-flag", value_name = "FLAG")]
    pub build_flags: Vec<String>,

    /// Emit the job record as JSON on stdout.
    #[arg(long)]
    pub report_json: bool,
}

impl JobArgs {
    /// Assemble the build context from flags, or load the serialized
    /// one named by `--context-file`.
    ///
    /// # Errors
    /// Returns [`CliError::ContextRead`] / [`CliError::ContextParse`]
    /// when a context file is named but unusable.
    pub fn load_context(&self) -> Result<BuildContext, CliError> {
        if let Some(path) = &self.context_file {
            let raw = std::fs::read(path).map_err(|source| CliError::ContextRead {
                path: path.clone(),
                source,
            })?;
            let context = serde_json::from_slice(&raw).map_err(|source| {
                CliError::ContextParse {
                    path: path.clone(),
                    source,
                }
            })?;
            return Ok(context);
        }

        let mut context = BuildContext::new(self.source_root.clone())
            .with_manifest_path(self.manifest_path.clone())
            .with_build_flags(self.build_flags.clone());

        if let Some(dir) = &self.artifacts_dir {
            let mut stash = ArtifactStash::new(dir.clone());
            if let Some(fingerprint) = &self.artifacts_fingerprint {
                stash = stash.with_fingerprint(fingerprint.clone());
            }
            context = context.with_artifacts(stash);
        }

        Ok(context)
    }

    /// The tool to invoke.
    #[must_use]
    pub fn tool_spec(&self) -> ToolSpec {
        match &self.tool_bin {
            Some(bin) => ToolSpec::new(bin.clone(), Vec::new()),
            None => ToolSpec::cargo_diet(),
        }
    }
}
