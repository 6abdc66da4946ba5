//! iiif-stage - resolve glTF/GLB models from IIIF manifests and drive a 3D stage.

mod defaults;
pub mod error;

pub mod config;
pub mod fetch;
pub mod manifest;
pub mod stage;

pub use error::{Error, Result};

pub use config::{FetchOptions, Messages, StageOptions};
pub use fetch::{FetchError, HttpSource, ManifestSource};
pub use manifest::{
    extract, extract_node, is_model_format, is_model_url, ManifestNode, ManifestReference,
    ModelReference, NodeView,
};
pub use stage::{
    Cycle, PresentationState, Resolution, ResolveFailure, StageController, StageSnapshot,
    StageView, ViewerProps,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
