//! Season-pack detection.
//!
//! Two independent heuristics, either one is enough:
//! - the release name carries a season marker (`S01`, `S2024`) and no
//!   episode marker (`S01E02`)
//! - the release directory holds at least [`SEASON_PACK_MIN_VIDEO_FILES`]
//!   video files, whatever the name says

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scanner::find_all_video_files;

/// Video-file count at which a release is treated as a season pack.
pub const SEASON_PACK_MIN_VIDEO_FILES: usize = 3;

pub(crate) static SEASON_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS\d{2,4}\b").expect("pattern should compile"));

static EPISODE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS\d{2,4}E\d{2,4}\b").expect("pattern should compile"));

static ISO_YEAR_SEASON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS(20\d{2})\b").expect("pattern should compile"));

/// Name heuristic: season marker without episode marker, or an `S20xx` year season.
pub fn is_season_pack_name(release_name: &str) -> bool {
    if SEASON_MARKER.is_match(release_name) && !EPISODE_MARKER.is_match(release_name) {
        return true;
    }
    ISO_YEAR_SEASON.is_match(release_name)
}

/// Fallback heuristic: enough video files under `release_path`.
///
/// Scan errors count as "not a pack".
pub fn is_season_pack_fallback(release_path: &Path) -> bool {
    match find_all_video_files(release_path) {
        Ok(files) => files.len() >= SEASON_PACK_MIN_VIDEO_FILES,
        Err(e) => {
            tracing::debug!(path = %release_path.display(), error = %e, "video scan failed");
            false
        }
    }
}

/// Returns `true` when either heuristic identifies a season pack.
pub fn is_season_pack(release_name: &str, release_path: &Path) -> bool {
    is_season_pack_name(release_name) || is_season_pack_fallback(release_path)
}
