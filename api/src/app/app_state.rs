use std::sync::Arc;

use contextor::{ChatModel, RagChain};
use rag_store::{RagConfig, RagStore};
use serde::Serialize;

use crate::app::app_config::AppConfig;

/// Non-secret configuration shown by the UI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SettingsView {
    pub qdrant_url: String,
    pub collection: String,
    pub embedding_model: String,
    pub llm_model: String,
    pub top_k: u64,
    pub score_threshold: f64,
}

impl SettingsView {
    pub fn new(rag: &RagConfig, embedding_model: &str, llm_model: &str) -> Self {
        Self {
            qdrant_url: rag.qdrant_url.clone(),
            collection: rag.collection.clone(),
            embedding_model: embedding_model.to_string(),
            llm_model: llm_model.to_string(),
            top_k: rag.top_k,
            score_threshold: rag.score_threshold,
        }
    }
}

/// Components that exist only when startup succeeded.
pub struct Librarian {
    pub store: Arc<RagStore>,
    pub chain: RagChain,
}

impl Librarian {
    pub fn new(store: Arc<RagStore>, llm: Arc<dyn ChatModel>) -> Self {
        let chain = RagChain::new(store.clone(), llm);
        Self { store, chain }
    }
}

/// Shared state for all HTTP handlers.
///
/// `librarian` is `None` when the vector store or the LLM client could not be
/// initialized; handlers then answer in disabled mode.
pub struct AppState {
    pub config: AppConfig,
    pub settings: SettingsView,
    pub librarian: Option<Librarian>,
}

impl AppState {
    pub fn is_ready(&self) -> bool {
        self.librarian.is_some()
    }
}
