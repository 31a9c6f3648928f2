//! Data types shared by the classification steps.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A video file found under a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
    pub dir: PathBuf,
    /// File name including extension.
    pub name: String,
}

impl VideoFile {
    /// Builds a record from a file path.
    pub fn from_path(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            dir: parent_dir(path).to_path_buf(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Directory containing `path`. A bare file name lives in `.`.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// One episode of a season pack, ready for metadata and upload.
///
/// Only valid episodes are ever constructed: `release_name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub video_file: VideoFile,
    /// Episode token such as `E01`.
    pub episode_number: String,
    /// Release name for this specific episode.
    pub release_name: String,
    /// Episode NFO, or the season-level NFO when the episode has none.
    pub nfo_file: Option<PathBuf>,
}

/// A single file in a release file list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListEntry {
    /// Path relative to the release root, `/`-separated.
    pub file_path: String,
    pub file_size_bytes: i64,
}
