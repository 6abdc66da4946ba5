//! Presentation state published by the stage controller.

use serde::Serialize;
use thiserror::Error;

use crate::config::Messages;
use crate::fetch::FetchError;
use crate::manifest::{ManifestReference, ModelReference};

/// What the stage currently shows. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum PresentationState {
    /// No manifest yet, or a resolution is in flight
    Loading,
    /// Resolution failed; holds the user-facing message
    Error(String),
    /// A model reference was found
    Ready(ModelReference),
}

impl PresentationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn model(&self) -> Option<&ModelReference> {
        match self {
            Self::Ready(model) => Some(model),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for PresentationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "LOADING"),
            Self::Error(message) => write!(f, "ERROR ({})", message),
            Self::Ready(model) => write!(f, "READY ({})", model),
        }
    }
}

/// Why a resolution cycle ended in an error state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolveFailure {
    #[error("no model reference found in manifest")]
    NotFound,

    #[error("failed to load manifest: {0}")]
    Fetch(#[serde(serialize_with = "serialize_display")] FetchError),

    #[error("unable to parse manifest: {0}")]
    Parse(String),
}

impl ResolveFailure {
    /// User-facing text for this failure.
    pub fn message<'m>(&self, messages: &'m Messages) -> &'m str {
        match self {
            Self::NotFound => messages.no_model.as_str(),
            Self::Fetch(_) => messages.fetch_failed.as_str(),
            Self::Parse(_) => messages.unparseable.as_str(),
        }
    }
}

impl From<FetchError> for ResolveFailure {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Parse(detail) => Self::Parse(detail),
            other => Self::Fetch(other),
        }
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Everything the controller publishes about the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSnapshot {
    /// Current cycle; bumped on every new manifest and on dismiss
    pub generation: u64,
    /// Identity of the manifest the current cycle serves
    pub manifest_key: Option<String>,
    pub state: PresentationState,
    /// Renderer reported the asset as loaded (only meaningful when ready)
    pub asset_loaded: bool,
    /// Diagnostic detail behind an error state
    pub failure: Option<ResolveFailure>,
}

impl Default for StageSnapshot {
    fn default() -> Self {
        Self {
            generation: 0,
            manifest_key: None,
            state: PresentationState::Loading,
            asset_loaded: false,
            failure: None,
        }
    }
}

/// Ticket for one resolution cycle.
///
/// Issued by [`StageController::observe`](crate::StageController::observe)
/// and consumed by [`StageController::resolve`](crate::StageController::resolve).
#[derive(Debug)]
pub struct Cycle {
    pub(crate) generation: u64,
    pub(crate) manifest: ManifestReference,
}

impl Cycle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn manifest(&self) -> &ManifestReference {
        &self.manifest
    }
}

/// Outcome of resolving a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The cycle was current and its state was committed
    Applied(PresentationState),
    /// A newer manifest (or a dismiss) replaced the cycle; nothing was committed
    Superseded,
}
