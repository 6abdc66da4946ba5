//! What the presentation collaborator should render for a snapshot.

use serde::Serialize;

use crate::config::StageOptions;
use crate::manifest::ModelReference;
use crate::stage::state::{PresentationState, StageSnapshot};

/// Properties handed to the 3D renderer as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerProps {
    pub src: ModelReference,
    pub env_preset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_preset: Option<[f64; 3]>,
}

/// Render instruction derived from a [`StageSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum StageView {
    Loading { message: String },
    Error { message: String },
    /// Mount the renderer; `overlay` is shown on top until the asset loads.
    Viewer {
        props: ViewerProps,
        overlay: Option<String>,
    },
}

impl StageView {
    pub fn from_snapshot(snapshot: &StageSnapshot, options: &StageOptions) -> Self {
        match &snapshot.state {
            PresentationState::Loading => Self::Loading {
                message: options.messages.loading.clone(),
            },
            PresentationState::Error(message) => Self::Error {
                message: message.clone(),
            },
            PresentationState::Ready(model) => Self::Viewer {
                props: ViewerProps {
                    src: model.clone(),
                    env_preset: options.env_preset.clone(),
                    rotation_preset: options.rotation_preset,
                },
                overlay: (!snapshot.asset_loaded).then(|| options.messages.loading.clone()),
            },
        }
    }

    pub fn props(&self) -> Option<&ViewerProps> {
        match self {
            Self::Viewer { props, .. } => Some(props),
            _ => None,
        }
    }

    pub fn is_overlaid(&self) -> bool {
        matches!(self, Self::Viewer { overlay: Some(_), .. })
    }
}
