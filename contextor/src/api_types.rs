//! Public API types re-used by external crates (e.g., the HTTP API layer).

use rag_store::{Metadata, RetrievedPassage, clamp_preview};
use serde::Serialize;

use crate::format::format_metadata;

/// Characters of passage text kept in a [`SourceInfo`] preview.
pub const SOURCE_PREVIEW_CHARS: usize = 200;

/// Citation for one passage that was fed to the model.
///
/// # Example
/// ```
/// use contextor::SourceInfo;
/// let s = SourceInfo {
///     content_preview: "Emma Zunz ...".into(),
///     citation: "Story: Emma Zunz".into(),
///     metadata: Default::default(),
///     score: 0.9,
///     distance: Some(0.1),
/// };
/// assert!(s.score > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceInfo {
    pub content_preview: String,
    /// `Story: .. | Source: ..` line shown under the answer.
    pub citation: String,
    pub metadata: Metadata,
    pub score: f64,
    pub distance: Option<f64>,
}

impl From<&RetrievedPassage> for SourceInfo {
    fn from(p: &RetrievedPassage) -> Self {
        Self {
            content_preview: clamp_preview(&p.content, SOURCE_PREVIEW_CHARS),
            citation: format_metadata(&p.metadata),
            metadata: p.metadata.clone(),
            score: p.score,
            distance: p.distance,
        }
    }
}

/// Final answer together with the sources and the context fed to the model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    pub answer: String,
    pub sources: Vec<SourceInfo>,
    pub context_used: String,
    pub num_sources: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResult {
    /// Result carrying only a message: no sources, no context.
    pub fn message(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
            context_used: String::new(),
            num_sources: 0,
            error: None,
        }
    }

    /// Answer backed by `passages`; `num_sources` follows `sources`.
    pub fn answered(answer: String, passages: &[RetrievedPassage], context_used: String) -> Self {
        let sources: Vec<SourceInfo> = passages.iter().map(SourceInfo::from).collect();
        Self {
            answer,
            num_sources: sources.len(),
            sources,
            context_used,
            error: None,
        }
    }

    /// Apology result for a failed query.
    pub fn failed(error: String) -> Self {
        Self {
            answer: format!(
                "I encountered an error while processing your question: {error}. Please try again."
            ),
            error: Some(error),
            ..Self::message("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(content: String) -> RetrievedPassage {
        RetrievedPassage {
            content,
            metadata: Metadata::new(),
            score: 0.8,
            distance: Some(0.2),
        }
    }

    #[test]
    fn long_content_preview_is_203_chars() {
        let content = "b".repeat(201);
        let s = SourceInfo::from(&passage(content.clone()));
        assert_eq!(s.content_preview.chars().count(), 203);
        assert!(s.content_preview.starts_with(&content[..200]));
        assert!(s.content_preview.ends_with("..."));
    }

    #[test]
    fn short_content_preview_is_verbatim() {
        let content = "c".repeat(200);
        assert_eq!(SourceInfo::from(&passage(content.clone())).content_preview, content);
    }

    #[test]
    fn citation_summarises_metadata() {
        let mut p = passage("Tlön".into());
        assert_eq!(SourceInfo::from(&p).citation, "No metadata available");

        p.metadata
            .insert("story_title".into(), serde_json::json!("Tlön, Uqbar, Orbis Tertius"));
        p.metadata.insert("page".into(), serde_json::json!(7));
        assert_eq!(
            SourceInfo::from(&p).citation,
            "Story: Tlön, Uqbar, Orbis Tertius | Page: 7"
        );
    }

    #[test]
    fn failed_result_embeds_message() {
        let r = QueryResult::failed("qdrant down".into());
        assert_eq!(
            r.answer,
            "I encountered an error while processing your question: qdrant down. Please try again."
        );
        assert_eq!(r.error.as_deref(), Some("qdrant down"));
        assert!(r.sources.is_empty());
        assert_eq!(r.num_sources, 0);
        assert_eq!(r.context_used, "");
    }

    #[test]
    fn error_field_is_omitted_when_absent() {
        let v = serde_json::to_value(QueryResult::message("hi")).unwrap();
        assert!(v.get("error").is_none());
        assert_eq!(v["num_sources"], 0);
    }
}
