//! Asset upload for one release or episode.

use std::fmt;

use crowdnfo_catalog::{CatalogApi, FileListRequest, FileType, FileUpload};
use crowdnfo_release::{Category, FileListEntry};
use tracing::{debug, info};

use crate::archive::Archive;
use crate::result::{ProcessResult, WarningKind};

/// The three uploadable asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    MediaInfo,
    Nfo,
    FileList,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssetKind::MediaInfo => "MediaInfo",
            AssetKind::Nfo => "NFO",
            AssetKind::FileList => "FileList",
        })
    }
}

/// NFO contents with the name of the file they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfoAsset {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Assets gathered for one release or episode. Absent kinds are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBundle {
    pub media_info: Option<Vec<u8>>,
    pub nfo: Option<NfoAsset>,
    pub file_list: Option<Vec<FileListEntry>>,
}

/// Where and how a bundle is filed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub release_name: String,
    pub category: Category,
    pub hash: Option<String>,
}

/// Sends asset bundles to the catalog.
///
/// Each asset is attempted independently: a failed upload is recorded and
/// the next asset is still sent.
pub struct AssetUploader<'a> {
    api: &'a dyn CatalogApi,
    archive: Option<&'a Archive>,
}

impl<'a> AssetUploader<'a> {
    pub fn new(api: &'a dyn CatalogApi, archive: Option<&'a Archive>) -> Self {
        Self { api, archive }
    }

    /// Uploads MediaInfo, NFO, and file list in that order.
    pub async fn upload(&self, target: &UploadTarget, bundle: AssetBundle) -> ProcessResult {
        let mut result = ProcessResult::new();

        if let Some(json) = bundle.media_info.filter(|d| !d.is_empty()) {
            let upload = self.file_upload(target, FileType::MediaInfo, None, json);
            self.send_file(AssetKind::MediaInfo, &upload, &mut result)
                .await;
        }

        if let Some(nfo) = bundle.nfo {
            let upload = self.file_upload(target, FileType::Nfo, Some(nfo.file_name), nfo.data);
            self.send_file(AssetKind::Nfo, &upload, &mut result).await;
        }

        if let Some(entries) = bundle.file_list.filter(|e| !e.is_empty()) {
            let request = FileListRequest {
                release_name: target.release_name.clone(),
                category: target.category,
                entries,
            };
            match self.api.upload_file_list(&request).await {
                Ok(()) => info!(release = %target.release_name, "file list uploaded"),
                Err(e) => result.warn(
                    &target.release_name,
                    WarningKind::Upload(AssetKind::FileList),
                    e,
                ),
            }
        }

        result
    }

    fn file_upload(
        &self,
        target: &UploadTarget,
        file_type: FileType,
        original_file_name: Option<String>,
        data: Vec<u8>,
    ) -> FileUpload {
        FileUpload {
            release_name: target.release_name.clone(),
            file_type,
            original_file_name,
            category: target.category,
            hash: target.hash.clone(),
            data,
        }
    }

    async fn send_file(&self, kind: AssetKind, upload: &FileUpload, result: &mut ProcessResult) {
        if let Err(e) = self.api.upload_file(upload).await {
            result.warn(&upload.release_name, WarningKind::Upload(kind), e);
            return;
        }
        info!(release = %upload.release_name, asset = %kind, "uploaded");

        let Some(archive) = self.archive else {
            return;
        };
        match archive.store(&upload.file_name(), &upload.data) {
            Ok(path) => debug!(path = %path.display(), "archived"),
            Err(e) => result.warn(&upload.release_name, WarningKind::Archive(kind), e),
        }
    }
}
