//! Filesystem scanning for releases.
//!
//! Locates the media file, video files, and NFO files of a release and
//! builds its file list. A release is either a single file or a directory
//! tree. All listings are sorted by path so repeated runs see the same order.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::ReleaseError;
use crate::types::{EpisodeInfo, FileListEntry, VideoFile, parent_dir};

/// Video container extensions (lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "ts", "m2ts", "mpg", "mpeg", "vob", "webm", "flv",
];

/// Audio extensions (lowercase).
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "flac", "mp3", "m4a", "m4b", "aac", "ogg", "opus", "wav", "wma", "alac", "ape", "dsf",
];

/// Disc images: hashed, but never handed to the media tool.
pub const HASH_ONLY_EXTENSIONS: &[&str] = &["iso", "img", "bin", "mdf", "nrg"];

fn extension_in(path: &Path, list: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| list.contains(&ext.as_str()))
}

/// Returns `true` for video container files.
pub fn is_video_file(path: &Path) -> bool {
    extension_in(path, VIDEO_EXTENSIONS)
}

/// Returns `true` for audio files.
pub fn is_audio_file(path: &Path) -> bool {
    extension_in(path, AUDIO_EXTENSIONS)
}

/// Returns `true` for files that are hashed but not analysed.
pub fn is_hash_only_file(path: &Path) -> bool {
    extension_in(path, HASH_ONLY_EXTENSIONS)
}

/// Returns `true` for `.nfo` files.
pub fn is_nfo_file(path: &Path) -> bool {
    extension_in(path, &["nfo"])
}

fn is_sample_name(stem: &str) -> bool {
    let s = stem.to_ascii_lowercase();
    s == "sample"
        || s == "samples"
        || s.starts_with("sample-")
        || s.ends_with("-sample")
        || s.ends_with(".sample")
        || s.ends_with("_sample")
}

fn is_sample_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let path = entry.path();
    let stem = if entry.file_type().is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    };
    stem.is_some_and(|s| is_sample_name(&s.to_string_lossy()))
}

/// Walks `root` and returns every regular file, sorted by path.
///
/// When `skip_samples` is set, sample directories and sample files are left out.
fn walk_files(root: &Path, skip_samples: bool) -> Result<Vec<PathBuf>, ReleaseError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(skip_samples && is_sample_entry(e)));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Finds every video file under a release, skipping samples.
pub fn find_all_video_files(release_path: &Path) -> Result<Vec<VideoFile>, ReleaseError> {
    let files = walk_files(release_path, true)?;
    Ok(files
        .iter()
        .filter(|p| is_video_file(p))
        .map(|p| VideoFile::from_path(p))
        .collect())
}

/// Returns the biggest video or disc-image file under a release.
///
/// Ties keep the first file in path order.
pub fn find_biggest_file(release_path: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    let mut biggest: Option<(PathBuf, u64)> = None;
    for path in walk_files(release_path, true)? {
        if !(is_video_file(&path) || is_hash_only_file(&path)) {
            continue;
        }
        let size = std::fs::metadata(&path)?.len();
        if biggest.as_ref().is_none_or(|(_, best)| size > *best) {
            biggest = Some((path, size));
        }
    }
    Ok(biggest.map(|(path, _)| path))
}

/// Returns the first audio file under a release, in path order.
pub fn find_first_audio_file(release_path: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    Ok(walk_files(release_path, true)?
        .into_iter()
        .find(|p| is_audio_file(p)))
}

/// Picks the file whose hash and media info represent the release.
///
/// The biggest video or disc image wins; audio-only releases fall back to
/// their first audio file.
pub fn find_media_file(release_path: &Path) -> Result<PathBuf, ReleaseError> {
    let no_media = || ReleaseError::NoMediaFile(release_path.display().to_string());

    match find_biggest_file(release_path) {
        Ok(Some(path)) => return Ok(path),
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "biggest file lookup failed"),
    }
    match find_first_audio_file(release_path) {
        Ok(Some(path)) => Ok(path),
        Ok(None) => Err(no_media()),
        Err(e) => {
            tracing::debug!(error = %e, "audio file lookup failed");
            Err(no_media())
        }
    }
}

/// Lists `.nfo` files directly inside `dir`, sorted by name.
fn nfo_files_in(dir: &Path) -> Result<Vec<PathBuf>, ReleaseError> {
    let mut nfos: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && is_nfo_file(p))
        .collect();
    nfos.sort();
    Ok(nfos)
}

/// Returns the `<stem>.nfo` sitting next to `file`, if any.
fn sibling_nfo(file: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    let Some(stem) = file.file_stem() else {
        return Ok(None);
    };
    Ok(nfo_files_in(parent_dir(file))?
        .into_iter()
        .find(|p| p.file_stem() == Some(stem)))
}

/// Finds the NFO describing a release.
///
/// A file release uses `<stem>.nfo` beside it. A directory release uses the
/// first NFO at its root, then the first one anywhere below it.
pub fn find_nfo_file(release_path: &Path) -> Result<Option<PathBuf>, ReleaseError> {
    if release_path.is_file() {
        return sibling_nfo(release_path);
    }
    if let Some(nfo) = nfo_files_in(release_path)?.into_iter().next() {
        return Ok(Some(nfo));
    }
    Ok(walk_files(release_path, false)?
        .into_iter()
        .find(|p| is_nfo_file(p)))
}

/// Returns the season-level NFO: the first NFO at the root of a directory release.
pub fn find_general_nfo(release_path: &Path) -> Option<PathBuf> {
    if !release_path.is_dir() {
        return None;
    }
    nfo_files_in(release_path).ok()?.into_iter().next()
}

/// Returns the NFO belonging to one episode video.
///
/// Prefers `<video stem>.nfo`, then any NFO in the same directory whose
/// name contains `token` (compared case-insensitively).
pub fn find_episode_nfo(video: &VideoFile, token: &str) -> Option<PathBuf> {
    if let Ok(Some(nfo)) = sibling_nfo(&video.path) {
        return Some(nfo);
    }
    let token = token.to_ascii_lowercase();
    nfo_files_in(&video.dir).ok()?.into_iter().find(|p| {
        p.file_name()
            .is_some_and(|n| n.to_string_lossy().to_ascii_lowercase().contains(&token))
    })
}

fn file_entry(path: &Path, relative: &Path) -> Result<FileListEntry, ReleaseError> {
    let size = std::fs::metadata(path)?.len() as i64;
    Ok(FileListEntry {
        file_path: relative.to_string_lossy().replace('\\', "/"),
        file_size_bytes: size,
    })
}

/// Builds the file list of a release: every file with its size.
///
/// Paths are relative to the release root. A file release lists itself by name.
pub fn create_file_list(release_path: &Path) -> Result<Vec<FileListEntry>, ReleaseError> {
    if release_path.is_file() {
        let name = release_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();
        return Ok(vec![file_entry(release_path, &name)?]);
    }

    let mut entries = Vec::new();
    for path in walk_files(release_path, false)? {
        let rel = path
            .strip_prefix(release_path)
            .map_err(std::io::Error::other)?;
        entries.push(file_entry(&path, rel)?);
    }
    Ok(entries)
}

/// Builds the file list of one episode: its video and, when it sits in the
/// same directory, its NFO.
pub fn create_episode_file_list(episode: &EpisodeInfo) -> Result<Vec<FileListEntry>, ReleaseError> {
    let video = &episode.video_file;
    let mut entries = vec![file_entry(&video.path, Path::new(&video.name))?];

    if let Some(nfo) = &episode.nfo_file {
        if parent_dir(nfo) == video.dir.as_path() {
            if let Some(name) = nfo.file_name() {
                entries.push(file_entry(nfo, Path::new(name))?);
            }
        }
    }
    Ok(entries)
}
