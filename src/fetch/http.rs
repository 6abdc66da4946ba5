//! HTTP manifest source.

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::FetchOptions;
use crate::defaults;
use crate::error::Result;
use crate::fetch::{FetchError, ManifestSource};

/// Manifest source backed by reqwest.
///
/// Handles `http`/`https` locations, `file://` locations (read from disk),
/// and relative locations when a base URL is configured.
pub struct HttpSource {
    client: Client,
    options: FetchOptions,
}

impl HttpSource {
    /// Create a source with default options.
    pub fn new() -> Result<Self> {
        Self::with_options(FetchOptions::default())
    }

    /// Create a source configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::with_options(FetchOptions::from_env()?)
    }

    pub fn with_options(options: FetchOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(defaults::MAX_REDIRECTS))
            .build()?;

        Ok(Self { client, options })
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    fn locate(&self, location: &str) -> std::result::Result<Url, FetchError> {
        let location = location.trim();
        match Url::parse(location) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.options.base_url.as_ref().ok_or_else(|| {
                    FetchError::Transport(format!("relative location {:?} without a base URL", location))
                })?;
                base.join(location).map_err(|e| {
                    FetchError::Transport(format!("invalid location {:?}: {}", location, e))
                })
            }
            Err(e) => Err(FetchError::Transport(format!(
                "invalid location {:?}: {}",
                location, e
            ))),
        }
    }

    async fn fetch_http(&self, url: Url) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, defaults::ACCEPT)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to read body: {}", e)))?;
        Ok(bytes.to_vec())
    }

    async fn read_file(&self, url: &Url) -> std::result::Result<Vec<u8>, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|_| FetchError::Transport(format!("not a local file: {}", url)))?;

        tokio::fs::read(&path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {}", path.display(), e)))
    }
}

impl ManifestSource for HttpSource {
    async fn fetch(&self, location: &str) -> std::result::Result<Value, FetchError> {
        let url = self.locate(location)?;
        log::debug!("Fetching manifest from {}", url);

        let body = match url.scheme() {
            "http" | "https" => self.fetch_http(url).await?,
            "file" => self.read_file(&url).await?,
            other => {
                return Err(FetchError::Transport(format!(
                    "unsupported scheme {:?}",
                    other
                )))
            }
        };

        parse_body(&body)
    }
}

fn parse_body(body: &[u8]) -> std::result::Result<Value, FetchError> {
    serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))
}
