//! Release classification error types.

/// Errors produced while classifying or scanning a release.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("filesystem walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("could not determine category for release: {0}")]
    UndeterminedCategory(String),

    #[error("no media file found in: {0}")]
    NoMediaFile(String),
}
