//! Error types for the CLI crate.

use std::path::PathBuf;

/// Errors that can occur before a job is handed to the runner.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// A `--context-file` could not be read.
    #[error("cannot read context file {path}: {source}")]
    ContextRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `--context-file` does not hold a valid serialized context.
    #[error("cannot parse context file {path}: {source}")]
    ContextParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
