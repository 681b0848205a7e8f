//! Vector search adapter over a Qdrant collection of Borges passages.
//!
//! This crate provides a clean API to:
//! - Connect to an existing collection and verify it is reachable
//! - Embed a question and retrieve the top-K passages with similarity scores
//! - Report collection diagnostics (count, sample metadata keys)
//!
//! The design is flat and splits responsibilities into focused modules.

mod collection;
mod config;
mod embed;
mod errors;
mod qdrant_facade;
mod record;
mod retrieve;

pub use collection::VectorCollection;
pub use config::{DistanceKind, RagConfig};
pub use embed::service::ServiceEmbedder;
pub use embed::{BoxFuture, EmbeddingsProvider};
pub use errors::RagError;
pub use qdrant_facade::QdrantCollection;
pub use record::{
    CollectionInfo, CollectionStatus, Metadata, RawMatch, RetrievedPassage, SampleData,
    clamp_preview, value_to_plain,
};

use std::sync::Arc;

use tracing::{debug, info, instrument, trace, warn};

/// Characters of the stored sample shown by [`RagStore::collection_info`].
const SAMPLE_PREVIEW_CHARS: usize = 100;

/// High-level facade that wires configuration, collection and embedder.
///
/// This is the single entry point recommended for application code.
pub struct RagStore {
    cfg: RagConfig,
    collection: Arc<dyn VectorCollection>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagStore {
    /// Wraps an already opened collection. No request is sent.
    pub fn new(
        cfg: RagConfig,
        collection: Arc<dyn VectorCollection>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Self {
        trace!("RagStore::new collection={}", cfg.collection);
        Self {
            cfg,
            collection,
            embedder,
        }
    }

    /// Opens the configured Qdrant collection and verifies it exists.
    ///
    /// # Errors
    /// `RagError::Connection` when the server is unreachable or the collection
    /// is missing.
    pub async fn connect(
        cfg: RagConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        let collection = QdrantCollection::new(&cfg).map_err(|e| connection_error(&cfg, e))?;
        Self::open(cfg, Arc::new(collection), embedder).await
    }

    /// Verifies `collection` is listed by its server, then wraps it.
    ///
    /// # Errors
    /// `RagError::Connection` on listing failure or a missing collection.
    pub async fn open(
        cfg: RagConfig,
        collection: Arc<dyn VectorCollection>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        let names = collection
            .list_collections()
            .await
            .map_err(|e| connection_error(&cfg, e))?;
        info!(available = ?names, "available collections");

        if !names.iter().any(|n| n == collection.name()) {
            return Err(connection_error(
                &cfg,
                RagError::Config(format!("collection '{}' not found", collection.name())),
            ));
        }

        match collection.count().await {
            Ok(count) => info!(
                collection = %collection.name(),
                count,
                "connected to collection"
            ),
            Err(e) => warn!(collection = %collection.name(), error = %e, "count unavailable"),
        }

        Ok(Self::new(cfg, collection, embedder))
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Name of the underlying collection.
    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    /// Embeds `query` and returns up to `k` passages, best first.
    ///
    /// `k` of `None` or `Some(0)` falls back to the configured `top_k`.
    /// When `score_threshold` is given, passages scoring below it are dropped.
    ///
    /// # Errors
    /// `RagError::Search` wrapping the embedding or query failure.
    #[instrument(skip_all, fields(collection = %self.cfg.collection))]
    pub async fn search(
        &self,
        query: &str,
        k: Option<u64>,
        score_threshold: Option<f64>,
    ) -> Result<Vec<RetrievedPassage>, RagError> {
        let k = match k {
            Some(n) if n > 0 => n,
            _ => self.cfg.top_k,
        };
        info!(query = %clamp_preview(query, 50), k, "searching passages");

        let vector = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| self.search_error(e))?;

        let raw = self
            .collection
            .query(vector, k)
            .await
            .map_err(|e| self.search_error(e))?;

        let mut passages: Vec<_> = raw.into_iter().map(retrieve::to_passage).collect();
        retrieve::apply_threshold(&mut passages, score_threshold);

        info!(found = passages.len(), "search completed");
        debug!(
            scores = ?passages.iter().map(|p| p.score).collect::<Vec<_>>(),
            "passage scores"
        );
        Ok(passages)
    }

    /// Collection diagnostics. Never fails: problems are reported in the
    /// returned value with `status = error`.
    #[instrument(skip_all, fields(collection = %self.cfg.collection))]
    pub async fn collection_info(&self) -> CollectionInfo {
        let name = self.collection.name().to_string();

        let count = match self.collection.count().await {
            Ok(c) => c,
            Err(e) => {
                warn!(collection = %name, error = %e, "collection info failed");
                return CollectionInfo::failed(name, e.to_string());
            }
        };

        let sample_data = if count > 0 {
            match self.sample().await {
                Ok(s) => s,
                Err(e) => {
                    warn!(collection = %name, error = %e, "could not fetch sample passage");
                    None
                }
            }
        } else {
            None
        };

        CollectionInfo::connected(name, count, sample_data)
    }

    async fn sample(&self) -> Result<Option<SampleData>, RagError> {
        let vector = self.embedder.embed("sample").await?;
        let raw = self.collection.query(vector, 1).await?;

        Ok(raw.into_iter().next().map(|m| {
            let p = retrieve::to_passage(m);
            SampleData {
                content_preview: clamp_preview(&p.content, SAMPLE_PREVIEW_CHARS),
                metadata_keys: p.metadata.keys().cloned().collect(),
            }
        }))
    }

    fn search_error(&self, e: RagError) -> RagError {
        warn!(collection = %self.collection.name(), error = %e, "search failed");
        RagError::Search {
            collection: self.collection.name().to_string(),
            reason: e.to_string(),
        }
    }
}

fn connection_error(cfg: &RagConfig, e: RagError) -> RagError {
    RagError::Connection {
        url: cfg.qdrant_url.clone(),
        collection: cfg.collection.clone(),
        reason: e.to_string(),
    }
}
