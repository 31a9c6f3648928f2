//! Fatal pipeline errors.

use crowdnfo_catalog::ApiError;
use crowdnfo_mediainfo::MediaInfoError;
use crowdnfo_release::ReleaseError;

/// Preconditions whose failure aborts a run before any upload.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("could not determine release name from path: {0}")]
    ReleaseName(String),

    #[error("API key is required")]
    MissingApiKey,

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error("no video files found in season pack: {0}")]
    NoVideoFiles(String),

    #[error("no episodes found in season pack: {0}")]
    NoEpisodes(String),

    #[error("MediaInfo check failed: {0}")]
    MediaInfo(#[from] MediaInfoError),

    #[error("catalog client error: {0}")]
    Catalog(#[from] ApiError),
}
