//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions live behind [`QdrantCollection`], which implements
//! [`VectorCollection`]. Qdrant reports a *score* per hit; it is translated
//! back to a distance here so the rest of the crate stays metric-agnostic.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{CountPointsBuilder, SearchPointsBuilder, Value as QValue};
use serde_json::Value;
use tracing::{debug, info};

use crate::collection::VectorCollection;
use crate::config::{DistanceKind, RagConfig};
use crate::embed::BoxFuture;
use crate::errors::RagError;
use crate::record::{Metadata, RawMatch};

/// Qdrant-backed collection handle.
pub struct QdrantCollection {
    client: Qdrant,
    collection: String,
    distance: DistanceKind,
    content_key: String,
}

impl QdrantCollection {
    /// Builds the client. No request is sent yet.
    ///
    /// # Errors
    /// `RagError::Config` on invalid config, `RagError::Qdrant` if the client
    /// cannot be built.
    pub fn new(cfg: &RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Qdrant(format!("client build: {e}")))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            distance: cfg.distance,
            content_key: cfg.content_key.clone(),
        })
    }
}

impl VectorCollection for QdrantCollection {
    fn name(&self) -> &str {
        &self.collection
    }

    fn query<'a>(
        &'a self,
        embedding: Vec<f32>,
        n_results: u64,
    ) -> BoxFuture<'a, Result<Vec<RawMatch>, RagError>> {
        Box::pin(async move {
            debug!(
                collection = %self.collection,
                n_results,
                "qdrant search_points"
            );

            let res = self
                .client
                .search_points(
                    SearchPointsBuilder::new(&self.collection, embedding, n_results)
                        .with_payload(true),
                )
                .await
                .map_err(|e| RagError::Qdrant(format!("search_points: {e}")))?;

            let out = res
                .result
                .into_iter()
                .map(|sp| {
                    let payload = qpayload_to_json(sp.payload);
                    let (document, metadata) = split_payload(payload, &self.content_key);
                    RawMatch {
                        document,
                        metadata: Some(metadata),
                        distance: Some(distance_from_score(self.distance, sp.score)),
                    }
                })
                .collect::<Vec<_>>();

            debug!(hits = out.len(), "qdrant search completed");
            Ok(out)
        })
    }

    fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64, RagError>> {
        Box::pin(async move {
            let res = self
                .client
                .count(CountPointsBuilder::new(&self.collection).exact(true))
                .await
                .map_err(|e| RagError::Qdrant(format!("count: {e}")))?;
            Ok(res.result.map(|r| r.count).unwrap_or(0))
        })
    }

    fn list_collections<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>, RagError>> {
        Box::pin(async move {
            let res = self
                .client
                .list_collections()
                .await
                .map_err(|e| RagError::Qdrant(format!("list_collections: {e}")))?;
            let names = res.collections.into_iter().map(|c| c.name).collect();
            info!(collection = %self.collection, "listed qdrant collections");
            Ok(names)
        })
    }
}

/// Qdrant score → distance.
///
/// Cosine and Dot scores are similarities (higher is closer), so the distance
/// is `1 - score`. Euclid scores are already distances.
pub fn distance_from_score(kind: DistanceKind, score: f32) -> f64 {
    let s = f64::from(score);
    match kind {
        DistanceKind::Cosine | DistanceKind::Dot => 1.0 - s,
        DistanceKind::Euclid => s,
    }
}

/// Separates passage text from its metadata.
///
/// The text is taken from `content_key`. Metadata is the nested `metadata`
/// object when the payload has one (LangChain layout), otherwise every other
/// top-level key.
pub fn split_payload(payload: Metadata, content_key: &str) -> (Option<String>, Metadata) {
    let mut payload = payload;
    let document = match payload.remove(content_key) {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };

    let metadata = match payload.remove("metadata") {
        Some(Value::Object(m)) => m.into_iter().collect(),
        Some(other) => {
            payload.insert("metadata".to_string(), other);
            payload
        }
        None => payload,
    };

    (document, metadata)
}

/// Converts a Qdrant payload into JSON values, recursing into structs/lists.
fn qpayload_to_json(p: HashMap<String, QValue>) -> Metadata {
    p.into_iter().map(|(k, v)| (k, qvalue_to_json(v))).collect()
}

fn qvalue_to_json(v: QValue) -> Value {
    use qdrant_client::qdrant::value::Kind as K;
    match v.kind {
        Some(K::StringValue(s)) => Value::String(s),
        Some(K::IntegerValue(i)) => Value::Number(i.into()),
        Some(K::DoubleValue(f)) => serde_json::json!(f),
        Some(K::BoolValue(b)) => Value::Bool(b),
        Some(K::StructValue(s)) => Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qvalue_to_json(v)))
                .collect(),
        ),
        Some(K::ListValue(l)) => Value::Array(l.values.into_iter().map(qvalue_to_json).collect()),
        Some(K::NullValue(_)) | None => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(v: Value) -> Metadata {
        v.as_object().unwrap().clone().into_iter().collect()
    }

    #[test]
    fn cosine_score_maps_back_to_distance() {
        assert!((distance_from_score(DistanceKind::Cosine, 0.9) - 0.1).abs() < 1e-6);
        assert!((distance_from_score(DistanceKind::Euclid, 3.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn flat_payload_keeps_other_keys_as_metadata() {
        let (doc, m) = split_payload(
            meta(json!({ "document": "Emma Zunz ...", "story_title": "Emma Zunz", "page": 3 })),
            "document",
        );
        assert_eq!(doc.as_deref(), Some("Emma Zunz ..."));
        assert_eq!(m.len(), 2);
        assert_eq!(m["story_title"], json!("Emma Zunz"));
    }

    #[test]
    fn nested_metadata_object_is_unwrapped() {
        let (doc, m) = split_payload(
            meta(json!({
                "page_content": "The Library of Babel",
                "metadata": { "source": "ficciones.pdf" }
            })),
            "page_content",
        );
        assert_eq!(doc.as_deref(), Some("The Library of Babel"));
        assert_eq!(m.keys().collect::<Vec<_>>(), ["source"]);
    }

    #[test]
    fn missing_content_key_yields_none() {
        let (doc, m) = split_payload(meta(json!({ "source": "x" })), "document");
        assert_eq!(doc, None);
        assert_eq!(m.len(), 1);
    }
}
