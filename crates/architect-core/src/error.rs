use thiserror::Error;

/// Error taxonomy for the analyzer core.
///
/// `ProjectFolderMissing` and `NoCodeFilesFound` are fatal: the pipeline
/// transitions to `Failed` and stops. `LspUnreachable` is non-fatal: the
/// pipeline continues with whatever symbol data it already has.
/// `InvalidGraphMutation` and `InternalInvariantViolation` indicate a
/// programmer error in a collaborator or in the core itself; the pipeline
/// aborts rather than working around a structurally broken tree.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("project folder missing: {0}")]
    ProjectFolderMissing(String),

    #[error("no code files found under {0}")]
    NoCodeFilesFound(String),

    #[error("language server unreachable: {0}")]
    LspUnreachable(String),

    #[error("invalid graph mutation: {0}")]
    InvalidGraphMutation(String),

    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(String),

    #[error("cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
