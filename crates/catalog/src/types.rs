//! Catalog wire types.

use std::fmt;

use crowdnfo_release::{Category, FileListEntry};
use serde::{Deserialize, Serialize};

/// Kind of file sent to the `files` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    MediaInfo,
    #[serde(rename = "NFO")]
    Nfo,
}

impl FileType {
    /// Value of the `FileType` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::MediaInfo => "MediaInfo",
            FileType::Nfo => "NFO",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file upload for one release or episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub release_name: String,
    pub file_type: FileType,
    /// Name of the file on disk; set for NFOs.
    pub original_file_name: Option<String>,
    pub category: Category,
    /// Lowercase hex SHA-256 of the release media file.
    pub hash: Option<String>,
    pub data: Vec<u8>,
}

impl FileUpload {
    /// File name used for the multipart part and for the archive copy.
    ///
    /// NFOs keep their original name; everything else is `<release>.json`.
    pub fn file_name(&self) -> String {
        match (&self.file_type, &self.original_file_name) {
            (FileType::Nfo, Some(name)) if !name.is_empty() => name.clone(),
            _ => format!("{}.json", self.release_name),
        }
    }
}

/// Body of `POST {base}/{release}/filelists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListRequest {
    pub release_name: String,
    pub category: Category,
    pub entries: Vec<FileListEntry>,
}
