//! Stage presentation options and fetch configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::defaults;
use crate::error::{Error, Result};

/// User-facing strings shown in place of the 3D stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Loading indicator, also used as the overlay while the asset loads
    pub loading: String,
    /// Manifest request failed (transport error or non-success status)
    pub fetch_failed: String,
    /// Manifest contained no model reference
    pub no_model: String,
    /// Manifest body was not valid JSON
    pub unparseable: String,
}

impl Messages {
    pub fn english() -> Self {
        Self {
            loading: "Loading 3D model...".into(),
            fetch_failed: "failed to load manifest".into(),
            no_model: "no model reference found in manifest".into(),
            unparseable: "unable to parse manifest".into(),
        }
    }

    pub fn estonian() -> Self {
        Self {
            loading: "Laen 3D mudelit...".into(),
            fetch_failed: "Manifesti laadimine ebaonnestus.".into(),
            no_model: "IIIF manifestist ei leitud glTF/GLB faili.".into(),
            unparseable: "3D vaaturi viga.".into(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

/// Presentation options, passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageOptions {
    /// Rendering environment preset name
    pub env_preset: String,
    /// Initial model rotation (x, y, z)
    pub rotation_preset: Option<[f64; 3]>,
    pub messages: Messages,
}

impl StageOptions {
    /// Load options from a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    pub fn with_env_preset(mut self, preset: impl Into<String>) -> Self {
        self.env_preset = preset.into();
        self
    }

    pub fn with_rotation_preset(mut self, rotation: [f64; 3]) -> Self {
        self.rotation_preset = Some(rotation);
        self
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            env_preset: defaults::env_preset(),
            rotation_preset: None,
            messages: Messages::default(),
        }
    }
}

/// Configuration for [`HttpSource`](crate::fetch::HttpSource).
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    /// Base for resolving relative manifest locations
    pub base_url: Option<Url>,
}

impl FetchOptions {
    /// Defaults overridden by `IIIF_STAGE_FETCH_TIMEOUT_SECS` and
    /// `IIIF_STAGE_BASE_URL` when set.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = Self::default();

        if let Some(secs) = lookup(defaults::TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::InvalidOption(format!("{} must be whole seconds, got {:?}", defaults::TIMEOUT_ENV, secs))
            })?;
            if secs == 0 {
                return Err(Error::InvalidOption(format!("{} must be positive", defaults::TIMEOUT_ENV)));
            }
            options.timeout = Duration::from_secs(secs);
        }

        if let Some(base) = lookup(defaults::BASE_URL_ENV).filter(|s| !s.trim().is_empty()) {
            options.base_url = Some(Url::parse(base.trim())?);
        }

        Ok(options)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(defaults::FETCH_TIMEOUT_SECS),
            user_agent: defaults::USER_AGENT.to_string(),
            base_url: None,
        }
    }
}
