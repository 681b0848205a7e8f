//! Default LLM configs loaded from environment variables.
//!
//! Two roles are supported:
//!
//! - **Chat**      → answer generation (`LLM_KIND`, default `openai`)
//! - **Embedding** → query embeddings (`EMBEDDING_PROVIDER`, default `ollama`)
//!
//! # Environment variables
//!
//! Chat:
//! - `LLM_KIND`        = `openai` | `ollama` (default `openai`)
//! - `MODEL_NAME`      = chat model (default `gpt-4o-mini`)
//! - `LLM_MAX_TOKENS`  = optional max tokens (default `1000`)
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER` = `ollama` | `openai` (default `ollama`)
//! - `EMBEDDING_MODEL`    = embedding model (default `all-minilm`)
//!
//! OpenAI:
//! - `OPENAI_API_KEY`  = API key (mandatory when any profile uses OpenAI)
//! - `OPENAI_BASE_URL` = endpoint (default `https://api.openai.com`)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)

use crate::config::{env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::AiLlmError;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// `OLLAMA_URL` wins over `OLLAMA_PORT` (which implies localhost).
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env::var("OLLAMA_URL") {
        return env::http_url("OLLAMA_URL", url);
    }
    Ok(match env::parsed::<u16>("OLLAMA_PORT", "expected u16 (1..=65535)")? {
        Some(port) => format!("http://localhost:{port}"),
        None => DEFAULT_OLLAMA_URL.to_string(),
    })
}

/// Endpoint and API key for `provider`. OpenAI without a key is an error.
fn endpoint_for(provider: LlmProvider) -> Result<(String, Option<String>), AiLlmError> {
    match provider {
        LlmProvider::Ollama => Ok((ollama_endpoint()?, None)),
        LlmProvider::OpenAI => {
            let url = env::http_url(
                "OPENAI_BASE_URL",
                env::var_or("OPENAI_BASE_URL", DEFAULT_OPENAI_URL),
            )?;
            Ok((url, Some(env::required("OPENAI_API_KEY")?)))
        }
    }
}

fn provider_from_env(name: &'static str, default: LlmProvider) -> Result<LlmProvider, AiLlmError> {
    match env::var(name) {
        Some(v) => Ok(v.parse::<LlmProvider>()?),
        None => Ok(default),
    }
}

/// Constructs the config for the **chat** profile.
///
/// # Env
/// - `LLM_KIND`, `MODEL_NAME`, `LLM_MAX_TOKENS`
/// - provider endpoint/key variables (see module docs)
///
/// # Defaults
/// - `max_tokens = Some(1000)`
/// - `timeout_secs = Some(120)`
///
/// # Errors
/// [`crate::error_handler::ConfigError::MissingVar`] when OpenAI is selected without `OPENAI_API_KEY`.
pub fn config_chat() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env("LLM_KIND", LlmProvider::OpenAI)?;
    let (endpoint, api_key) = endpoint_for(provider)?;
    let model = env::var_or("MODEL_NAME", DEFAULT_CHAT_MODEL);
    let max_tokens = env::parsed::<u32>("LLM_MAX_TOKENS", "expected u32")?.unwrap_or(DEFAULT_MAX_TOKENS);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: Some(max_tokens),
        temperature: None,
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs the config for the **embedding** profile.
///
/// # Env
/// - `EMBEDDING_PROVIDER`, `EMBEDDING_MODEL`
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env("EMBEDDING_PROVIDER", LlmProvider::Ollama)?;
    let (endpoint, api_key) = endpoint_for(provider)?;
    let model = env::var_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
