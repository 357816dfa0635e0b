//! Example build contexts demonstrating the schema.
//!
//! Used by tests across the workspace so every crate exercises the same
//! canonical shapes.

use std::path::PathBuf;

use crate::context::{ArtifactStash, BuildContext};

/// A fully constructed context: source tree, manifest, artifact stash.
#[must_use]
pub fn example_context() -> BuildContext {
    BuildContext::new(PathBuf::from("/tmp/trimgate-example/project"))
        .with_artifacts(
            ArtifactStash::new("/tmp/trimgate-example/artifacts")
                .with_fingerprint("deps-3f9a2c"),
        )
        .with_build_flags(vec!["--package".to_owned(), "example-app".to_owned()])
}

/// A context the builder never attached artifacts to.
///
/// Deriving jobs from this context must fail validation before any tool
/// is invoked.
#[must_use]
pub fn example_context_without_artifacts() -> BuildContext {
    BuildContext::new(PathBuf::from("/tmp/trimgate-example/project"))
}
