//! OpenAI client: chat completions and embeddings.
//!
//! Non-streaming only. Paths are appended to `LlmModelConfig::endpoint`:
//! `/v1/chat/completions` for answers and `/v1/embeddings` for query vectors.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::provider_http::ProviderHttp;
use crate::{
    completion::Completion,
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, ProviderError, ProviderErrorKind},
};

const CHAT_PATH: &str = "/v1/chat/completions";
const EMBEDDINGS_PATH: &str = "/v1/embeddings";

#[derive(Debug)]
pub struct OpenAiService {
    http: ProviderHttp,
    cfg: LlmModelConfig,
}

impl OpenAiService {
    /// # Errors
    /// Provider errors for a non-OpenAI config, a missing API key or an
    /// endpoint without http(s) scheme; transport error if the client
    /// cannot be built.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let key = cfg.api_key.as_deref().ok_or_else(|| {
            ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey)
        })?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
            ProviderError::new(
                LlmProvider::OpenAI,
                ProviderErrorKind::Decode("API key is not a valid header value".into()),
            )
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let http = ProviderHttp::new(LlmProvider::OpenAI, &cfg, headers)?;
        info!(model = %cfg.model, endpoint = %cfg.endpoint, "OpenAI client ready");

        Ok(Self { http, cfg })
    }

    /// One chat completion with the prompt as the single user message.
    ///
    /// The body is kept as raw JSON; the first `choices[].message.content`
    /// string becomes the completion text.
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<Completion, AiLlmError> {
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt);
        let raw: Value = self.http.post_json(CHAT_PATH, &body).await?;
        let content = extract_chat_content(&raw);
        info!(has_content = content.is_some(), "chat completion finished");
        Ok(Completion { content, raw })
    }

    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };
        let out: EmbeddingsResponse = self.http.post_json(EMBEDDINGS_PATH, &body).await?;
        out.data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| self.http.decode_error("embeddings response has empty `data`"))
    }
}

fn extract_chat_content(raw: &Value) -> Option<String> {
    raw.get("choices")?
        .as_array()?
        .iter()
        .find_map(|c| c.pointer("/message/content")?.as_str().map(str::to_string))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [UserMessage<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
        }
    }
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
