// Error types for folio.
// Covers configuration, GitHub fetches, the local store, and the form endpoint.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("HTTP error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Unexpected response status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("GitHub rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store error: {0}")]
    Store(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
