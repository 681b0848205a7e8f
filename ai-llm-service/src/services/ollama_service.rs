//! Ollama client: `/api/generate` (with `stream=false`) and `/api/embeddings`.
//!
//! ```no_run
//! use ai_llm_service::{LlmModelConfig, LlmProvider};
//! use ai_llm_service::services::ollama_service::OllamaService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = OllamaService::new(LlmModelConfig {
//!     provider: LlmProvider::Ollama,
//!     model: "all-minilm".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     api_key: None,
//!     max_tokens: None,
//!     temperature: Some(0.0),
//!     top_p: None,
//!     timeout_secs: Some(30),
//! })?;
//! let v = svc.embeddings("The Garden of Forking Paths").await?;
//! println!("dim = {}", v.len());
//! # Ok(()) }
//! ```

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::provider_http::ProviderHttp;
use crate::completion::Completion;
use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::AiLlmError;

const GENERATE_PATH: &str = "/api/generate";
const EMBEDDINGS_PATH: &str = "/api/embeddings";

#[derive(Debug)]
pub struct OllamaService {
    http: ProviderHttp,
    cfg: LlmModelConfig,
}

impl OllamaService {
    /// # Errors
    /// Provider errors for a non-Ollama config or an endpoint without
    /// http(s) scheme; transport error if the client cannot be built.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let http = ProviderHttp::new(LlmProvider::Ollama, &cfg, HeaderMap::new())?;
        Ok(Self { http, cfg })
    }

    /// Text lives in the `response` field of the generate body.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<Completion, AiLlmError> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);
        let raw: Value = self.http.post_json(GENERATE_PATH, &body).await?;
        let content = raw
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_string);
        debug!(has_content = content.is_some(), "generate finished");
        Ok(Completion { content, raw })
    }

    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };
        let out: EmbeddingsResponse = self.http.post_json(EMBEDDINGS_PATH, &body).await?;
        Ok(out.embedding)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            prompt,
            stream: false,
            options: SamplingOptions {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                num_predict: cfg.max_tokens,
            },
        }
    }
}

/// The `options` keys this client sets.
#[derive(Debug, Serialize)]
struct SamplingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "llama3".into(),
            endpoint: "http://localhost:11434/".into(),
            api_key: None,
            max_tokens: Some(64),
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn generate_body_disables_streaming() {
        let cfg = cfg();
        let body = serde_json::to_value(GenerateRequest::from_cfg(&cfg, "hello")).unwrap();
        assert_eq!(body["stream"], false);
        assert_eq!(body["prompt"], "hello");
        assert_eq!(body["options"]["num_predict"], 64);
        assert!(body["options"].get("top_p").is_none());
    }

    #[test]
    fn embeddings_body_uses_prompt_field() {
        let body = serde_json::to_value(EmbeddingsRequest {
            model: "all-minilm",
            prompt: "mirrors",
        })
        .unwrap();
        assert_eq!(body["prompt"], "mirrors");
        assert!(body.get("input").is_none());
    }

    #[test]
    fn openai_config_is_rejected() {
        let mut c = cfg();
        c.provider = LlmProvider::OpenAI;
        assert!(OllamaService::new(c).is_err());
    }
}
