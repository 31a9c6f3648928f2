//! HTTP client for the catalog API.
//!
//! Async client using `reqwest` with API-key header authentication.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::api::CatalogApi;
use crate::error::ApiError;
use crate::types::{FileListRequest, FileUpload};

pub const DEFAULT_BASE_URL: &str = "https://crowdnfo.net/api/releases";

/// Header carrying the API key. Lowercase, as header names go on the wire.
pub const API_KEY_HEADER: &str = "x-api-key";

pub const USER_AGENT: &str = concat!("crowdnfo-rs/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Release names go into a single path segment; RFC 3986 unreserved
/// characters stay as they are.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'-')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for [`CatalogClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Settings for the public catalog with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Catalog API client.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Builds a client; fails if the key cannot be sent as a header value.
    pub fn new(config: &CatalogConfig) -> Result<Self, ApiError> {
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|_| ApiError::InvalidKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, release_name: &str, resource: &str) -> String {
        let encoded = utf8_percent_encode(release_name, PATH_SEGMENT);
        format!("{}/{encoded}/{resource}", self.base_url)
    }

    async fn post_file(&self, upload: &FileUpload) -> Result<(), ApiError> {
        let url = self.endpoint(&upload.release_name, "files");

        let mut form = Form::new().text("FileType", upload.file_type.as_str());
        if let Some(name) = upload.original_file_name.as_deref().filter(|n| !n.is_empty()) {
            form = form.text("OriginalFileName", name.to_string());
        }
        form = form.text("Category", upload.category.as_str());
        if let Some(hash) = upload.hash.as_deref().filter(|h| !h.is_empty()) {
            form = form.text("FileHash", hash.to_string());
        }
        let part = Part::bytes(upload.data.clone())
            .file_name(upload.file_name())
            .mime_str("application/octet-stream")?;
        form = form.part("File", part);

        debug!(release = %upload.release_name, file_type = %upload.file_type, "uploading file");
        let resp = self.http.post(&url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn post_file_list(&self, request: &FileListRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&request.release_name, "filelists");
        let body = serde_json::to_vec(request)?;

        debug!(release = %request.release_name, entries = request.entries.len(), "uploading file list");
        let resp = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = resp.status();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::BAD_REQUEST => ApiError::BadRequest(body),
            _ => ApiError::Status {
                status: status.as_u16(),
                body,
            },
        })
    }
}

impl CatalogApi for CatalogClient {
    fn upload_file<'a>(
        &'a self,
        upload: &'a FileUpload,
    ) -> Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'a>> {
        Box::pin(self.post_file(upload))
    }

    fn upload_file_list<'a>(
        &'a self,
        request: &'a FileListRequest,
    ) -> Pin<Box<dyn Future<Output = Result<(), ApiError>> + Send + 'a>> {
        Box::pin(self.post_file_list(request))
    }
}
