//! Error types for iiif-stage.

use thiserror::Error;

/// iiif-stage error type.
///
/// Resolution never surfaces these to the caller; failures there end up as
/// [`PresentationState::Error`](crate::PresentationState::Error). This type
/// covers construction and configuration paths.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Manifest fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::fetch::FetchError),

    /// Configuration value out of range or unparseable
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Result type alias for iiif-stage operations.
pub type Result<T> = std::result::Result<T, Error>;
