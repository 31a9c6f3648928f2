//! CrowdNFO release catalog API client.
//!
//! Two endpoints per release: `POST {base}/{release}/files` takes a
//! multipart MediaInfo or NFO upload, `POST {base}/{release}/filelists`
//! takes a JSON file list. Requests carry the API key in `X-Api-Key`.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::CatalogApi;
pub use client::{
    API_KEY_HEADER, CatalogClient, CatalogConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT,
};
pub use error::ApiError;
pub use types::{FileListRequest, FileType, FileUpload};
