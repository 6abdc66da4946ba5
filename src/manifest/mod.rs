//! Manifest handling: references and model extraction.

pub mod extract;
pub mod reference;

pub use extract::{extract, extract_node, is_model_format, is_model_url, ManifestNode, NodeView};
pub use reference::{ManifestReference, ModelReference};
