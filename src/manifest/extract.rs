//! Model reference extraction from arbitrarily shaped manifest data.
//!
//! The walk has no schema. It looks for the first string that reads as a
//! glTF/GLB URL, giving identifier fields on a mapping priority over
//! anything nested beneath them.

use std::collections::HashSet;

use serde_json::Value;

use crate::manifest::reference::ModelReference;

/// Fields read, in order, when identifying a mapping directly.
const IDENTIFIER_FIELDS: [&str; 4] = ["id", "@id", "url", "href"];
const FORMAT_FIELD: &str = "format";
const MODEL_MEDIA_PREFIX: &[u8] = b"model/";
const EXTENSION_STEM: &[u8] = b".gl";

/// Closed view of a single manifest node.
pub enum NodeView<'a, N> {
    Text(&'a str),
    Sequence(Vec<N>),
    /// Entries in document order.
    Mapping(Vec<(&'a str, N)>),
    Other,
}

/// A node the extractor can walk.
///
/// Implementors normalize their own representation into a [`NodeView`] and
/// report a stable identity, which the walk uses to stop on nodes it has
/// already visited.
pub trait ManifestNode: Sized {
    fn view(&self) -> NodeView<'_, Self>;

    fn identity(&self) -> usize;
}

impl<'v> ManifestNode for &'v Value {
    fn view(&self) -> NodeView<'_, Self> {
        match *self {
            Value::String(text) => NodeView::Text(text),
            Value::Array(items) => NodeView::Sequence(items.iter().collect()),
            Value::Object(map) => {
                NodeView::Mapping(map.iter().map(|(key, value)| (key.as_str(), value)).collect())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => NodeView::Other,
        }
    }

    fn identity(&self) -> usize {
        *self as *const Value as usize
    }
}

/// Find the first model reference in a JSON value.
pub fn extract(value: &Value) -> Option<ModelReference> {
    extract_node(value)
}

/// Find the first model reference reachable from `root`.
///
/// Sequences are searched in order, mappings first by their own identifier
/// fields and then child by child in key order. A node whose identity was
/// already visited ends that branch, so cyclic graphs terminate.
pub fn extract_node<N: ManifestNode>(root: N) -> Option<ModelReference> {
    let mut visited = HashSet::new();
    walk(&root, &mut visited)
}

fn walk<N: ManifestNode>(node: &N, visited: &mut HashSet<usize>) -> Option<ModelReference> {
    if !visited.insert(node.identity()) {
        log::trace!("Skipping revisited manifest node {:#x}", node.identity());
        return None;
    }

    match node.view() {
        NodeView::Text(text) => is_model_url(text).then(|| ModelReference::new(text)),
        NodeView::Sequence(items) => items.iter().find_map(|item| walk(item, visited)),
        NodeView::Mapping(entries) => identify(&entries)
            .or_else(|| entries.iter().find_map(|(_, child)| walk(child, visited))),
        NodeView::Other => None,
    }
}

/// Direct identification of a mapping from its own fields.
fn identify<N: ManifestNode>(entries: &[(&str, N)]) -> Option<ModelReference> {
    let candidate = IDENTIFIER_FIELDS
        .iter()
        .filter_map(|field| text_field(entries, field))
        .find(|text| !text.is_empty())?;

    let declared_model = text_field(entries, FORMAT_FIELD).is_some_and(is_model_format);

    (is_model_url(candidate) || declared_model).then(|| ModelReference::new(candidate))
}

fn text_field<'e, N: ManifestNode>(entries: &'e [(&str, N)], name: &str) -> Option<&'e str> {
    let (_, node) = entries.iter().find(|(key, _)| *key == name)?;
    match node.view() {
        NodeView::Text(text) => Some(text),
        _ => None,
    }
}

/// Whether `value` names a glTF/GLB file.
///
/// Matches `.glb` or `.gltf` anywhere in the string, case-insensitively,
/// when followed by `?`, `#` or the end of the string.
pub fn is_model_url(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes
        .windows(EXTENSION_STEM.len())
        .enumerate()
        .filter(|(_, window)| window.eq_ignore_ascii_case(EXTENSION_STEM))
        .any(|(start, _)| {
            let rest = &bytes[start + EXTENSION_STEM.len()..];
            strip_prefix_ignore_case(rest, b"b")
                .or_else(|| strip_prefix_ignore_case(rest, b"tf"))
                .is_some_and(|tail| matches!(tail.first().copied(), None | Some(b'?' | b'#')))
        })
}

/// Whether `value` is a `model/*` media type.
pub fn is_model_format(value: &str) -> bool {
    strip_prefix_ignore_case(value.as_bytes(), MODEL_MEDIA_PREFIX).is_some()
}

fn strip_prefix_ignore_case<'a>(bytes: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    if bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&bytes[prefix.len()..])
    } else {
        None
    }
}
