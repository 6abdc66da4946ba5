//! Manifest fetching.
//!
//! This module provides:
//! - The `ManifestSource` capability the stage controller fetches through
//! - An HTTP (and `file://`) implementation backed by reqwest (`http`)

pub mod http;

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpSource;

/// Why a manifest could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Request never produced a response (network, DNS, timeout, bad location)
    #[error("transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// Body was received but is not valid JSON
    #[error("invalid manifest body: {0}")]
    Parse(String),
}

/// Capability to load a manifest document from a location.
///
/// Implementations report ordinary HTTP error statuses as
/// [`FetchError::Status`] and keep undecodable bodies apart as
/// [`FetchError::Parse`]. Timeouts are the implementation's concern.
pub trait ManifestSource: Send + Sync {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

impl<S: ManifestSource> ManifestSource for std::sync::Arc<S> {
    fn fetch(&self, location: &str) -> impl Future<Output = Result<Value, FetchError>> + Send {
        (**self).fetch(location)
    }
}
