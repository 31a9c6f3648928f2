//! Release classification for CrowdNFO uploads.
//!
//! Everything here is a pure function of the release name and the
//! filesystem state under the release path. Nothing talks to the network.
//!
//! # Pipeline inputs
//!
//! 1. **Category**: explicit value or first matching name rule
//! 2. **Season pack**: name markers, or the video-file-count fallback
//! 3. **Episodes**: one record per video file carrying an `SxxEyy` token
//! 4. **Hash policy**: size threshold deciding whether to digest a file

pub mod category;
pub mod episode;
pub mod error;
pub mod hash;
pub mod scanner;
pub mod season;
pub mod types;

pub use category::{Category, match_category, resolve_category};
pub use episode::{extract_episode_info, extract_episodes};
pub use error::ReleaseError;
pub use hash::{HashDecision, HashPolicy, calculate_sha256, should_hash};
pub use season::{
    SEASON_PACK_MIN_VIDEO_FILES, is_season_pack, is_season_pack_fallback, is_season_pack_name,
};
pub use types::{EpisodeInfo, FileListEntry, VideoFile};

/// Returns the release name for a path.
///
/// A directory release is named after its final component; trailing
/// separators are ignored, so `/data/Show.S01/` yields `Show.S01`. A file
/// release drops its extension: `Movie.2024-GRP.mkv` yields `Movie.2024-GRP`.
/// Returns `None` for paths without a usable final component (`/`, `..`).
pub fn release_name(path: &std::path::Path) -> Option<String> {
    let name = if path.is_file() {
        path.file_stem()?
    } else {
        path.file_name()?
    };
    let name = name.to_string_lossy();
    if name.is_empty() {
        None
    } else {
        Some(name.into_owned())
    }
}
