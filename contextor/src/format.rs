//! Context formatting and small text helpers.

use rag_store::{Metadata, RetrievedPassage, value_to_plain};

/// Context used when retrieval returned nothing.
pub const NO_PASSAGES: &str = "No relevant passages found in the collection.";

/// Renders passages as numbered blocks, in input order.
///
/// ```
/// use contextor::format_context;
/// assert_eq!(format_context(&[]), "No relevant passages found in the collection.");
/// ```
pub fn format_context(passages: &[RetrievedPassage]) -> String {
    if passages.is_empty() {
        return NO_PASSAGES.to_string();
    }

    passages
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let story_info = if let Some(title) = p.meta_str("story_title") {
                format!(" (from '{title}')")
            } else if let Some(source) = p.meta_str("source") {
                format!(" (from {source})")
            } else {
                String::new()
            };
            format!(
                "Passage {}{} [Relevance: {:.3}]:\n{}",
                i + 1,
                story_info,
                p.score,
                p.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Cuts `text` so the result, suffix included, is at most `max_len` chars.
pub fn truncate_text(text: &str, max_len: usize, suffix: &str) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let keep = max_len.saturating_sub(suffix.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(suffix);
    out
}

/// Trims and collapses runs of whitespace into single spaces.
pub fn clean_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One-line summary of the well-known metadata keys.
pub fn format_metadata(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return "No metadata available".to_string();
    }

    let parts: Vec<String> = [
        ("story_title", "Story"),
        ("source", "Source"),
        ("page", "Page"),
        ("chapter", "Chapter"),
    ]
    .iter()
    .filter_map(|(key, label)| {
        metadata
            .get(*key)
            .map(|v| format!("{label}: {}", value_to_plain(v)))
    })
    .collect();

    if parts.is_empty() {
        "Basic metadata".to_string()
    } else {
        parts.join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passage(content: &str, score: f64, meta: &[(&str, serde_json::Value)]) -> RetrievedPassage {
        RetrievedPassage {
            content: content.to_string(),
            metadata: meta
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            score,
            distance: Some(1.0 - score),
        }
    }

    #[test]
    fn empty_input_has_fixed_text() {
        assert_eq!(format_context(&[]), NO_PASSAGES);
    }

    #[test]
    fn story_title_beats_source() {
        let ps = [
            passage(
                "Emma Zunz returned from the Tarbuch y Loewenthal mill.",
                0.9,
                &[("story_title", json!("Emma Zunz")), ("source", json!("el_aleph.pdf"))],
            ),
            passage("Second.", 0.7, &[("source", json!("ficciones.pdf"))]),
            passage("Third.", 0.5, &[]),
        ];

        let out = format_context(&ps);

        assert_eq!(
            out,
            "Passage 1 (from 'Emma Zunz') [Relevance: 0.900]:\n\
             Emma Zunz returned from the Tarbuch y Loewenthal mill.\n\n\
             Passage 2 (from ficciones.pdf) [Relevance: 0.700]:\nSecond.\n\n\
             Passage 3 [Relevance: 0.500]:\nThird."
        );
    }

    #[test]
    fn formatting_is_deterministic() {
        let ps = [passage("a", 0.12345, &[]), passage("b", 0.0, &[])];
        assert_eq!(format_context(&ps), format_context(&ps));
        assert!(format_context(&ps).starts_with("Passage 1 [Relevance: 0.123]:\na"));
    }

    #[test]
    fn reordering_input_reorders_blocks() {
        let x = passage("x", 0.9, &[]);
        let y = passage("y", 0.5, &[]);

        assert_eq!(
            format_context(&[x.clone(), y.clone()]),
            "Passage 1 [Relevance: 0.900]:\nx\n\nPassage 2 [Relevance: 0.500]:\ny"
        );
        assert_eq!(
            format_context(&[y, x]),
            "Passage 1 [Relevance: 0.500]:\ny\n\nPassage 2 [Relevance: 0.900]:\nx"
        );
    }

    #[test]
    fn truncate_counts_suffix() {
        assert_eq!(truncate_text("short", 200, "..."), "short");
        let long = "x".repeat(250);
        let t = truncate_text(&long, 200, "...");
        assert_eq!(t.chars().count(), 200);
        assert!(t.ends_with("..."));
        assert_eq!(truncate_text("abcdef", 2, "..."), "...");
    }

    #[test]
    fn clean_query_collapses_whitespace() {
        assert_eq!(clean_query("  What   is\tthe \n Aleph? "), "What is the Aleph?");
        assert_eq!(clean_query("   "), "");
    }

    #[test]
    fn metadata_summary_uses_known_keys_in_order() {
        let m: Metadata = [
            ("page".to_string(), json!(42)),
            ("story_title".to_string(), json!("The Zahir")),
            ("source".to_string(), json!("el_aleph.pdf")),
            ("chapter".to_string(), json!("II")),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            format_metadata(&m),
            "Story: The Zahir | Source: el_aleph.pdf | Page: 42 | Chapter: II"
        );
    }

    #[test]
    fn metadata_summary_fallbacks() {
        assert_eq!(format_metadata(&Metadata::new()), "No metadata available");
        let m: Metadata = [("lang".to_string(), json!("es"))].into_iter().collect();
        assert_eq!(format_metadata(&m), "Basic metadata");
    }
}
