//! Per-episode records for season packs.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scanner::find_episode_nfo;
use crate::season::SEASON_MARKER;
use crate::types::{EpisodeInfo, VideoFile};

/// `SxxEyy` token inside a file name. Group 1 is the token, group 2 the episode digits.
static EPISODE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(s\d{1,4}e(\d{1,4}))").expect("episode pattern should compile")
});

/// Builds the episode record for one video of a season pack.
///
/// Returns `None` when the file name carries no `SxxEyy` token; such videos
/// are not episodes and are left out of the run.
///
/// The episode label is the release name with its season marker replaced by
/// the episode token (`Show.S01.1080p` becomes `Show.S01E02.1080p`). When
/// the release name has no season marker, the video's own stem is used.
pub fn extract_episode_info(
    video: &VideoFile,
    release_name: &str,
    general_nfo: Option<&Path>,
) -> Option<EpisodeInfo> {
    let stem = video.stem();
    let caps = EPISODE_TOKEN.captures(&stem)?;
    let token = caps.get(1)?.as_str().to_ascii_uppercase();
    let episode_number = format!("E{}", caps.get(2)?.as_str());

    let label = if SEASON_MARKER.is_match(release_name) {
        SEASON_MARKER
            .replace(release_name, token.as_str())
            .into_owned()
    } else {
        stem.clone()
    };

    let nfo_file =
        find_episode_nfo(video, &token).or_else(|| general_nfo.map(Path::to_path_buf));

    Some(EpisodeInfo {
        video_file: video.clone(),
        episode_number,
        release_name: label,
        nfo_file,
    })
}

/// Builds episode records for every video that carries an episode token.
///
/// Input order is kept and duplicates are not collapsed.
pub fn extract_episodes(
    videos: &[VideoFile],
    release_name: &str,
    general_nfo: Option<&Path>,
) -> Vec<EpisodeInfo> {
    videos
        .iter()
        .filter_map(|video| {
            let episode = extract_episode_info(video, release_name, general_nfo);
            if episode.is_none() {
                tracing::debug!(file = %video.name, "no episode token, skipping");
            }
            episode
        })
        .collect()
}
