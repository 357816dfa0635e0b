//! The shared build context consumed by every checker job.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::SessionId;

/// The immutable build context shared by every job derived in a session.
///
/// Owned by the builder collaborator; checker jobs only read it. The
/// check and apply jobs of one session must be handed the *same*
/// context so that both validate the same artifact set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BuildContext {
    /// The session this context was constructed for.
    pub session_id: SessionId,
    /// Root of the project tree the tool runs against.
    pub source_root: PathBuf,
    /// Path to the dependency manifest, relative to `source_root`.
    pub manifest_path: PathBuf,
    /// Extra flags forwarded verbatim to the trimming tool.
    pub build_flags: Vec<String>,
    /// Cargo features the artifact set was built with.
    pub features: Vec<String>,
    /// Reference to the pre-built dependency artifacts, if any.
    pub artifacts: Option<ArtifactStash>,
}

impl BuildContext {
    /// Create a context rooted at `source_root` with the conventional
    /// manifest location and no artifacts.
    #[must_use]
    pub fn new(source_root: PathBuf) -> Self {
        Self {
            session_id: SessionId::new(),
            source_root,
            manifest_path: PathBuf::from("Cargo.toml"),
            build_flags: Vec::new(),
            features: Vec::new(),
            artifacts: None,
        }
    }

    /// Attach a pre-built artifact reference.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: ArtifactStash) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Override the manifest location.
    #[must_use]
    pub fn with_manifest_path(mut self, manifest_path: PathBuf) -> Self {
        self.manifest_path = manifest_path;
        self
    }

    /// Add flags forwarded to the trimming tool.
    #[must_use]
    pub fn with_build_flags(mut self, flags: Vec<String>) -> Self {
        self.build_flags = flags;
        self
    }

    /// Absolute path of the manifest file.
    #[must_use]
    pub fn manifest_file(&self) -> PathBuf {
        self.source_root.join(&self.manifest_path)
    }

    /// Validate the context before deriving jobs from it.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingArtifacts`] if no artifact reference is
    /// attached, or [`CoreError::ContextValidation`] if a field is
    /// structurally empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.source_root.as_os_str().is_empty() {
            return Err(CoreError::ContextValidation {
                field: "source_root".to_owned(),
                reason: "path is empty".to_owned(),
            });
        }
        if self.manifest_path.as_os_str().is_empty() {
            return Err(CoreError::ContextValidation {
                field: "manifest_path".to_owned(),
                reason: "path is empty".to_owned(),
            });
        }
        match &self.artifacts {
            None => Err(CoreError::MissingArtifacts),
            Some(stash) if stash.root.as_os_str().is_empty() => {
                Err(CoreError::ContextValidation {
                    field: "artifacts.root".to_owned(),
                    reason: "path is empty".to_owned(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}

/// Reference to the compiled-dependency artifact output reused by both
/// modes of a session.
///
/// Both jobs treat the stash as read-only; neither mode writes into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ArtifactStash {
    /// Directory holding the pre-built dependency artifacts.
    pub root: PathBuf,
    /// Opaque fingerprint of the artifact build, when the builder
    /// collaborator provides one.
    pub fingerprint: Option<String>,
}

impl ArtifactStash {
    /// Create a stash rooted at `root` with no fingerprint.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fingerprint: None,
        }
    }

    /// Attach the builder's artifact fingerprint.
    #[must_use]
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    /// The artifact directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
