//! Release processing pipeline for CrowdNFO uploads.
//!
//! This crate holds the **orchestration**: it ties release classification,
//! MediaInfo extraction, and the catalog client together. The catalog is
//! reached through [`CatalogApi`](crowdnfo_catalog::CatalogApi), so the
//! whole flow runs against in-memory mocks in tests.
//!
//! # Pipeline
//!
//! 1. **Startup**: resolve name and category, detect season packs
//! 2. **Metadata**: MediaInfo JSON, NFO, file list (episode extraction for packs)
//! 3. **Hashing**: SHA-256 of the media file, subject to the size policy
//! 4. **Upload**: each asset independently, archiving successful file uploads
//!
//! Failures in steps 2 to 4 become warnings; only precondition failures
//! abort the run.

pub mod archive;
pub mod error;
pub mod process;
pub mod progress;
pub mod result;
pub mod upload;

pub use archive::Archive;
pub use crowdnfo_catalog::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ProcessError;
pub use process::{ReleaseOptions, ReleaseProcessor, process_release};
pub use progress::{ProgressEvent, ProgressObserver, Stage};
pub use result::{ProcessResult, Warning, WarningKind};
pub use upload::{AssetBundle, AssetKind, AssetUploader, NfoAsset, UploadTarget};
