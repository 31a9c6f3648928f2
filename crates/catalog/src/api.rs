//! Seam between the upload pipeline and the HTTP client.

use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;
use crate::types::{FileListRequest, FileUpload};

/// Operations the pipeline needs from the catalog.
///
/// [`crate::CatalogClient`] is the HTTP implementation; tests substitute
/// in-memory recorders.
pub trait CatalogApi: Send + Sync {
    /// Uploads one MediaInfo or NFO file.
    fn upload_file<'a>(
        &'a self,
        upload: &'a FileUpload,
    ) -> Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'a>>;

    /// Uploads the file list of a release.
    fn upload_file_list<'a>(
        &'a self,
        request: &'a FileListRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'a>>;
}
