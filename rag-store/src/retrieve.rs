//! Mapping of raw matches into ranked passages.

use crate::record::{RawMatch, RetrievedPassage};

/// Similarity score for a raw distance: `1 - d`, or `0` when `d` is unknown.
///
/// Only meaningful for distances bounded in `[0, 1]` (e.g. cosine distance);
/// unbounded metrics can yield negative scores.
pub fn similarity_from_distance(distance: Option<f64>) -> f64 {
    match distance {
        Some(d) => 1.0 - d,
        None => 0.0,
    }
}

/// Types a raw match; missing text/metadata become empty values.
pub fn to_passage(m: RawMatch) -> RetrievedPassage {
    RetrievedPassage {
        content: m.document.unwrap_or_default(),
        metadata: m.metadata.unwrap_or_default(),
        score: similarity_from_distance(m.distance),
        distance: m.distance,
    }
}

/// Drops passages scoring below `threshold`, keeping order.
pub fn apply_threshold(passages: &mut Vec<RetrievedPassage>, threshold: Option<f64>) {
    if let Some(t) = threshold {
        passages.retain(|p| p.score >= t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_one_minus_distance() {
        for d in [0.0, 0.1, 0.3, 0.5, 1.0] {
            assert!((similarity_from_distance(Some(d)) - (1.0 - d)).abs() < 1e-12);
        }
        assert_eq!(similarity_from_distance(None), 0.0);
    }

    #[test]
    fn unbounded_distance_is_not_clamped() {
        assert!((similarity_from_distance(Some(2.5)) + 1.5).abs() < 1e-12);
    }

    #[test]
    fn to_passage_defaults_missing_fields() {
        let p = to_passage(RawMatch::default());
        assert_eq!(p.content, "");
        assert!(p.metadata.is_empty());
        assert_eq!(p.score, 0.0);
        assert_eq!(p.distance, None);
    }

    #[test]
    fn threshold_filters_in_place() {
        let mut ps: Vec<_> = [0.1, 0.5, 0.2]
            .into_iter()
            .map(|d| {
                to_passage(RawMatch {
                    document: Some(format!("d{d}")),
                    metadata: None,
                    distance: Some(d),
                })
            })
            .collect();
        apply_threshold(&mut ps, Some(0.7));
        let docs: Vec<_> = ps.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(docs, ["d0.1", "d0.2"]);

        apply_threshold(&mut ps, None);
        assert_eq!(ps.len(), 2);
    }
}
