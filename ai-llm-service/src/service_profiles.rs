//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - Both HTTP clients are built in [`LlmServiceProfiles::new`]; there is no
//!   first-call initialization and no interior mutability.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//! use ai_llm_service::config::default_config::{config_chat, config_embedding};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::new(config_chat()?, config_embedding()?)?);
//!
//!     let out = svc.generate("Who wrote Ficciones?").await?;
//!     println!("{}", out.text());
//!
//!     let emb = svc.embed("labyrinth").await?;
//!     println!("Embedding dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use tracing::info;

use crate::{
    completion::Completion,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// A ready-to-use client for one profile.
#[derive(Debug)]
enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

impl Backend {
    fn build(cfg: &LlmModelConfig) -> Result<Self, AiLlmError> {
        match cfg.provider {
            LlmProvider::Ollama => Ok(Backend::Ollama(OllamaService::new(cfg.clone())?)),
            LlmProvider::OpenAI => Ok(Backend::OpenAI(OpenAiService::new(cfg.clone())?)),
        }
    }
}

/// Service that owns the **chat** and **embedding** clients.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    chat_cfg: LlmModelConfig,
    embedding_cfg: LlmModelConfig,
    chat: Backend,
    embedding: Backend,
}

impl LlmServiceProfiles {
    /// Builds both clients eagerly.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be constructed
    /// (wrong provider, missing API key, invalid endpoint).
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self, AiLlmError> {
        let chat_backend = Backend::build(&chat)?;
        let embedding_backend = Backend::build(&embedding)?;

        info!(
            chat_provider = %chat.provider,
            chat_model = %chat.model,
            embedding_provider = %embedding.provider,
            embedding_model = %embedding.model,
            "LLM service profiles ready"
        );

        Ok(Self {
            chat_cfg: chat,
            embedding_cfg: embedding,
            chat: chat_backend,
            embedding: embedding_backend,
        })
    }

    /// Generates a completion for `prompt` using the **chat** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the request fails.
    pub async fn generate(&self, prompt: &str) -> Result<Completion, AiLlmError> {
        match &self.chat {
            Backend::Ollama(cli) => cli.generate(prompt).await,
            Backend::OpenAI(cli) => cli.generate(prompt).await,
        }
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        match &self.embedding {
            Backend::Ollama(cli) => cli.embeddings(input).await,
            Backend::OpenAI(cli) => cli.embeddings(input).await,
        }
    }

    /// Returns references to the current profiles `(chat, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.chat_cfg, &self.embedding_cfg)
    }
}
