use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{JobId, ManifestDigest, SessionId};
use crate::job::Mode;

/// A complete record of a single checker job.
///
/// Records are immutable once created and are the only thing a session
/// keeps after a job's process exits. The pipeline gate reads the exit
/// code out of the record; everything else is diagnostic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct JobRecord {
    /// The job this record describes.
    pub job_id: JobId,
    /// The session the job was derived in.
    pub session_id: SessionId,
    /// The mode the job ran under.
    pub mode: Mode,
    /// When the tool process was started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the tool process.
    pub duration: Duration,
    /// Final status of the job.
    pub status: JobStatus,
    /// Manifest digest taken before the tool ran.
    pub digest_before: ManifestDigest,
    /// Manifest digest taken after the tool exited.
    pub digest_after: ManifestDigest,
    /// Everything the tool wrote to stdout/stderr.
    pub output: CapturedOutput,
}

impl JobRecord {
    /// Create a new job record.
    ///
    /// # Arguments
    /// - `job_id`: the job this record describes
    /// - `session_id`: the session the job belongs to
    /// - `mode`: the mode the job ran under
    /// - `started_at`: wall-clock start time
    /// - `duration`: wall-clock elapsed time
    /// - `status`: final job status
    /// - `digest_before` / `digest_after`: manifest digests around the run
    /// - `output`: captured tool output
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        job_id: JobId,
        session_id: SessionId,
        mode: Mode,
        started_at: DateTime<Utc>,
        duration: Duration,
        status: JobStatus,
        digest_before: ManifestDigest,
        digest_after: ManifestDigest,
        output: CapturedOutput,
    ) -> Self {
        Self {
            job_id,
            session_id,
            mode,
            started_at,
            duration,
            status,
            digest_before,
            digest_after,
            output,
        }
    }

    /// The tool's exit code (0 for [`JobStatus::Succeeded`]).
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.status {
            JobStatus::Succeeded => 0,
            JobStatus::Failed { exit_code } => exit_code,
        }
    }

    /// Whether the tool exited 0.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self.status, JobStatus::Succeeded)
    }

    /// Whether the manifest's bytes changed across the run.
    #[must_use]
    pub fn manifest_mutated(&self) -> bool {
        self.digest_before != self.digest_after
    }
}

/// The outcome of a checker job whose process ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// The tool exited 0: manifest minimal (check) or rewritten (apply).
    Succeeded,
    /// The tool exited non-zero. In check mode this is the actionable
    /// "superfluous entries found" signal, not a fault.
    Failed {
        /// The tool's exit code.
        exit_code: i32,
    },
}

impl JobStatus {
    /// Build a status from a raw exit code.
    #[must_use]
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            JobStatus::Succeeded
        } else {
            JobStatus::Failed { exit_code }
        }
    }
}

/// Raw bytes the tool wrote to its standard streams.
///
/// The tool's output is an opaque diagnostic blob: it is never parsed,
/// only carried. In the JSON form both streams are base64-encoded so
/// non-UTF-8 output survives serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CapturedOutput {
    /// Bytes written to stdout.
    #[serde(with = "b64")]
    pub stdout: Vec<u8>,
    /// Bytes written to stderr.
    #[serde(with = "b64")]
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    /// Create from raw stream bytes.
    #[must_use]
    pub fn new(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self { stdout, stderr }
    }

    /// Lossy UTF-8 view of stdout for display.
    #[must_use]
    pub fn stdout_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Lossy UTF-8 view of stderr for display.
    #[must_use]
    pub fn stderr_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Whether both streams are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// Base64 (de)serialization for raw stream bytes.
mod b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
