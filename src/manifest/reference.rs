//! Manifest and model reference types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::manifest::extract::is_model_url;

/// URL identified as pointing to a 3D asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelReference(String);

impl ModelReference {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Accept `url` only if its extension marks it as glTF/GLB.
    pub fn parse(url: &str) -> Option<Self> {
        is_model_url(url).then(|| Self::new(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ModelReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ModelReference {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModelReference {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Where a stage gets its manifest from.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestReference {
    /// A fetchable location, possibly already a direct model URL.
    Location(String),
    /// An already materialized manifest document.
    Inline(Value),
}

impl ManifestReference {
    pub fn location(location: impl Into<String>) -> Self {
        Self::Location(location.into())
    }

    pub fn inline(document: Value) -> Self {
        Self::Inline(document)
    }

    /// Parse a JSON document into an inline manifest.
    pub fn parse_inline(json: &str) -> Result<Self> {
        Ok(Self::Inline(serde_json::from_str(json)?))
    }

    /// Identity used to decide whether a new resolution cycle is needed.
    ///
    /// Locations compare literally, inline documents by their compact
    /// serialization. A location and a document serializing to the same
    /// JSON string stay distinct.
    pub fn identity_key(&self) -> String {
        match self {
            Self::Location(location) => format!("loc:{}", location),
            Self::Inline(document) => format!("doc:{}", document),
        }
    }

    /// Whether this is a location that already names a model file.
    pub fn direct_model(&self) -> Option<ModelReference> {
        match self {
            Self::Location(location) => ModelReference::parse(location),
            Self::Inline(_) => None,
        }
    }
}

impl From<&str> for ManifestReference {
    fn from(location: &str) -> Self {
        Self::Location(location.to_string())
    }
}

impl From<String> for ManifestReference {
    fn from(location: String) -> Self {
        Self::Location(location)
    }
}

impl From<Value> for ManifestReference {
    fn from(document: Value) -> Self {
        Self::Inline(document)
    }
}
