//! Errors raised while configuring or calling a model provider.
//!
//! Everything funnels into [`AiLlmError`]. Provider failures are prefixed
//! with the backend name (`openai: ...`, `ollama: ...`).

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::llm_provider::LlmProvider;

pub type Result<T> = std::result::Result<T, AiLlmError>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Connection refused, timeout, TLS failure and the like.
    #[error("LLM request failed: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/// Bad or missing environment at startup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Absent or blank.
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid number ({reason})")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error("unknown LLM provider '{0}' (expected openai or ollama)")]
    UnsupportedProvider(String),

    #[error("{var} is malformed: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Flattened, length-capped response body.
    pub snippet: String,
}

#[non_exhaustive]
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// Config handed to a client for another backend.
    InvalidProvider,
    MissingApiKey,
    InvalidEndpoint(String),
    HttpStatus(HttpError),
    Decode(String),
}

impl std::fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProvider => f.write_str("invalid provider for this service"),
            Self::MissingApiKey => f.write_str("missing API key"),
            Self::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            Self::HttpStatus(h) => write!(f, "HTTP {} from {}: {}", h.status, h.url, h.snippet),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

/// A failure attributed to one backend.
#[derive(Debug, Error)]
#[error("{provider}: {kind}")]
pub struct ProviderError {
    pub provider: LlmProvider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: LlmProvider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}
