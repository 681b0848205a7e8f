//! Provider-agnostic result of a single (non-streaming) generation call.

use serde_json::Value;

/// Generated text plus the raw response body it was extracted from.
///
/// `content` is `None` when the provider answered successfully but the body
/// did not have the expected shape (e.g. no `choices[0].message.content`).
#[derive(Clone, Debug, PartialEq)]
pub struct Completion {
    pub content: Option<String>,
    pub raw: Value,
}

impl Completion {
    /// Completion with known text content; `raw` mirrors it as a JSON string.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            raw: Value::String(text.clone()),
            content: Some(text),
        }
    }

    /// The textual answer, degrading to the serialized raw body when the
    /// response carried no text content.
    pub fn text(&self) -> String {
        match &self.content {
            Some(c) => c.clone(),
            None => self.raw.to_string(),
        }
    }
}
