//! Core types for the trimgate dependency-trim gate.
//!
//! Defines the fundamental domain types: the shared build context,
//! checker jobs and their two invocation modes, and the job records
//! the pipeline gate consumes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod context;
pub mod error;
pub mod examples;
pub mod id;
pub mod job;
pub mod record;

pub use context::{ArtifactStash, BuildContext};
pub use error::CoreError;
pub use id::{JobId, ManifestDigest, SessionId};
pub use job::{CheckerJob, Mode, ToolCommand, ToolSpec};
pub use record::{CapturedOutput, JobRecord, JobStatus};
