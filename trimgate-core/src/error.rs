/// Errors produced by the `trimgate-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The build context carries no artifact reference.
    #[error("build context has no artifact reference")]
    MissingArtifacts,

    /// A build context field failed validation.
    #[error("context validation failed for field '{field}': {reason}")]
    ContextValidation { field: String, reason: String },
}
