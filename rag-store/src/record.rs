//! Core data models used by the library.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Passage metadata (e.g. `story_title`, `source`, `page`).
pub type Metadata = BTreeMap<String, Value>;

/// One nearest-neighbor match as reported by a [`crate::VectorCollection`].
///
/// Fields stay optional here; [`RetrievedPassage`] is the typed view the rest
/// of the application works with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMatch {
    pub document: Option<String>,
    pub metadata: Option<Metadata>,
    pub distance: Option<f64>,
}

/// A ranked passage returned by [`crate::RagStore::search`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetrievedPassage {
    pub content: String,
    pub metadata: Metadata,
    /// `1 - distance`, or `0` when the distance is unknown.
    pub score: f64,
    pub distance: Option<f64>,
}

impl RetrievedPassage {
    /// Returns a string metadata value, if present.
    pub fn meta_str(&self, key: &str) -> Option<String> {
        self.metadata.get(key).map(value_to_plain)
    }
}

/// Renders a JSON value without quotes for strings.
pub fn value_to_plain(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Diagnostics about the connected collection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    pub status: CollectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<SampleData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionInfo {
    pub fn connected(name: String, count: u64, sample_data: Option<SampleData>) -> Self {
        Self {
            name,
            count: Some(count),
            status: CollectionStatus::Connected,
            sample_data,
            error: None,
        }
    }

    pub fn failed(name: String, error: String) -> Self {
        Self {
            name,
            count: None,
            status: CollectionStatus::Error,
            sample_data: None,
            error: Some(error),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Connected,
    Error,
}

/// Shape of one stored passage, used to show which metadata keys exist.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleData {
    pub content_preview: String,
    pub metadata_keys: Vec<String>,
}

/// Keeps the first `max` characters and appends `...` when `text` is longer.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-char.
pub fn clamp_preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
