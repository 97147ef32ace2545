//! Error types for backend gateway calls

use thiserror::Error;

/// Errors that can occur while talking to the benchmark backend
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The configured base URL cannot carry path segments
    #[error("invalid backend URL: {0}")]
    InvalidBaseUrl(String),

    /// Transport-level failure (connection refused, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with an unexpected status
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;
