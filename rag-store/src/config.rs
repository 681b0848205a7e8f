//! Runtime and collection configuration.

use std::str::FromStr;

use crate::errors::RagError;

/// Distance function of the collection's vector space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    Dot,
    /// Euclidean distance (L2).
    Euclid,
}

impl FromStr for DistanceKind {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosine" => Ok(DistanceKind::Cosine),
            "dot" | "dotproduct" => Ok(DistanceKind::Dot),
            "euclid" | "l2" => Ok(DistanceKind::Euclid),
            other => Err(RagError::Config(format!("unknown distance '{other}'"))),
        }
    }
}

/// Configuration for retrieval over one collection.
#[derive(Clone, Debug)]
pub struct RagConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Distance function the collection was created with.
    pub distance: DistanceKind,
    /// Default number of passages per search.
    pub top_k: u64,
    /// Minimum similarity shown in the UI; not applied unless passed to `search`.
    pub score_threshold: f64,
    /// Payload key holding the passage text.
    pub content_key: String,
    /// Expected embedding dimensionality, checked on every query vector when set.
    pub embedding_dim: Option<usize>,
}

impl RagConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            distance: DistanceKind::Cosine,
            top_k: 5,
            score_threshold: 0.7,
            content_key: "document".to_string(),
            embedding_dim: None,
        }
    }

    /// Build from environment variables.
    ///
    /// - `QDRANT_URL` (default `http://localhost:6334`)
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (default `borges_stories`)
    /// - `QDRANT_DISTANCE` (`Cosine` | `Dot` | `Euclid`, default `Cosine`)
    /// - `RAG_TOP_K` (default 5)
    /// - `RAG_SCORE_THRESHOLD` (default 0.7)
    /// - `RAG_CONTENT_KEY` (default `document`)
    /// - `EMBEDDING_DIM` (optional)
    ///
    /// # Errors
    /// `RagError::Config` on unparsable values or failed validation.
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::new_default(
            env("QDRANT_URL", "http://localhost:6334"),
            env("QDRANT_COLLECTION", "borges_stories"),
        );
        cfg.qdrant_api_key = std::env::var("QDRANT_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        if let Some(d) = opt_env("QDRANT_DISTANCE") {
            cfg.distance = d.parse()?;
        }
        if let Some(k) = parse_env::<u64>("RAG_TOP_K")? {
            cfg.top_k = k;
        }
        if let Some(t) = parse_env::<f64>("RAG_SCORE_THRESHOLD")? {
            cfg.score_threshold = t;
        }
        if let Some(key) = opt_env("RAG_CONTENT_KEY") {
            cfg.content_key = key;
        }
        cfg.embedding_dim = parse_env::<usize>("EMBEDDING_DIM")?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.content_key.trim().is_empty() {
            return Err(RagError::Config("content_key is empty".into()));
        }
        Ok(())
    }
}

fn env(k: &str, dflt: &str) -> String {
    opt_env(k).unwrap_or_else(|| dflt.to_string())
}

fn opt_env(k: &str) -> Option<String> {
    std::env::var(k).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(k: &str) -> Result<Option<T>, RagError> {
    match opt_env(k) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| RagError::Config(format!("{k}: cannot parse '{v}'"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_parses_aliases() {
        assert_eq!("COSINE".parse::<DistanceKind>().unwrap(), DistanceKind::Cosine);
        assert_eq!("l2".parse::<DistanceKind>().unwrap(), DistanceKind::Euclid);
        assert_eq!("dotproduct".parse::<DistanceKind>().unwrap(), DistanceKind::Dot);
        assert!("manhattan".parse::<DistanceKind>().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = RagConfig::new_default("http://localhost:6334", "borges_stories");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.top_k, 5);
        assert_eq!(cfg.content_key, "document");
    }

    #[test]
    fn validation_catches_empty_fields() {
        let mut cfg = RagConfig::new_default("http://localhost:6334", " ");
        assert!(cfg.validate().is_err());
        cfg.collection = "c".into();
        cfg.top_k = 0;
        assert!(cfg.validate().is_err());
    }
}
