/// Errors from the catalog API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized: please check your API key")]
    Unauthorized,

    /// Rejected file list; the server's message is kept verbatim.
    #[error("{0}")]
    BadRequest(String),

    #[error("upload failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid API key")]
    InvalidKey,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
