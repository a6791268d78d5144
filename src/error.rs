//! Top-level error type for wxpop
//!
//! Aggregates the failure kinds of the whole application: missing
//! configuration, HTTP/parse failures on the live fetch, payloads missing
//! expected sections at render time, and filesystem trouble. Most of these
//! are fatal and propagate out of `main` with a diagnostic.

use thiserror::Error;

use crate::data::FormatError;

/// Errors surfaced by the fetch/cache/render pipeline and the popup shell
#[derive(Debug, Error)]
pub enum WxError {
    /// Missing or unusable configuration (typically the API key)
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse a JSON response
    #[error("failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload is missing data a rendering call needs
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Cache directory or file operation failed
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// Window system or web view failure in the popup shell
    #[error("window system error: {0}")]
    Window(String),
}
