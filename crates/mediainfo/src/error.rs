/// Errors from the MediaInfo integration.
#[derive(Debug, thiserror::Error)]
pub enum MediaInfoError {
    #[error("failed to run MediaInfo: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("MediaInfo exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("could not parse version from: {0:?}")]
    VersionParse(String),

    #[error("MediaInfo version {found} is too old (minimum required: {minimum})")]
    TooOld { found: u32, minimum: u32 },
}
