//! Embedding provider backed by the shared [`LlmServiceProfiles`].

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use tracing::trace;

use super::{BoxFuture, EmbeddingsProvider};
use crate::errors::RagError;

/// Embeds text through the **embedding** profile of the LLM service.
#[derive(Clone)]
pub struct ServiceEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected dimension; `None` skips the check.
    dim: Option<usize>,
}

impl ServiceEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for ServiceEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            let v = self
                .svc
                .embed(text)
                .await
                .map_err(|e| RagError::Embedding(e.to_string()))?;
            trace!(dim = v.len(), "ServiceEmbedder::embed");

            if let Some(want) = self.dim {
                if v.len() != want {
                    return Err(RagError::VectorSizeMismatch { got: v.len(), want });
                }
            }
            if v.is_empty() {
                return Err(RagError::Embedding("empty embedding vector".into()));
            }

            Ok(v)
        })
    }
}
