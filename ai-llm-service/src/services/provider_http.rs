//! JSON-over-HTTP plumbing shared by the provider clients.
//!
//! Each provider client owns one [`ProviderHttp`]: a `reqwest::Client` with
//! the profile timeout and default headers, bound to the provider's base URL.
//! Non-2xx answers become [`ProviderErrorKind::HttpStatus`] with a short body
//! snippet; undecodable bodies become [`ProviderErrorKind::Decode`].

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const SNIPPET_CHARS: usize = 240;

#[derive(Debug)]
pub(crate) struct ProviderHttp {
    provider: LlmProvider,
    client: reqwest::Client,
    base: String,
}

impl ProviderHttp {
    /// Checks that `cfg` targets `provider` and has an http(s) endpoint, then
    /// builds the client.
    pub(crate) fn new(
        provider: LlmProvider,
        cfg: &LlmModelConfig,
        headers: HeaderMap,
    ) -> Result<Self, AiLlmError> {
        if cfg.provider != provider {
            return Err(ProviderError::new(provider, ProviderErrorKind::InvalidProvider).into());
        }

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            provider,
            client,
            base: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an API path such as `/v1/embeddings`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub(crate) fn decode_error(&self, msg: impl Into<String>) -> AiLlmError {
        ProviderError::new(self.provider, ProviderErrorKind::Decode(msg.into())).into()
    }

    /// POSTs `body` as JSON to `path` and decodes the answer as `R`.
    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, AiLlmError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        let started = Instant::now();
        debug!(provider = %self.provider, %url, "POST");

        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            warn!(
                provider = %self.provider,
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "provider returned non-success status"
            );
            return Err(ProviderError::new(
                self.provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out = resp
            .json::<R>()
            .await
            .map_err(|e| self.decode_error(format!("{path}: {e}")))?;

        debug!(
            provider = %self.provider,
            latency_ms = started.elapsed().as_millis(),
            "response decoded"
        );
        Ok(out)
    }
}

/// One-line, length-capped view of a response body for error messages.
pub(crate) fn make_snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}…", &flat[..cut]),
        None => flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(provider: LlmProvider, endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider,
            model: "m".into(),
            endpoint: endpoint.into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn snippet_flattens_and_clamps() {
        let body = format!("line one\n  line two {}", "x".repeat(500));
        let s = make_snippet(&body);
        assert!(s.starts_with("line one line two"));
        assert_eq!(s.chars().count(), SNIPPET_CHARS + 1);
        assert!(s.ends_with('…'));
        assert_eq!(make_snippet(" short\nbody "), "short body");
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let http = ProviderHttp::new(
            LlmProvider::Ollama,
            &cfg(LlmProvider::Ollama, "http://localhost:11434/"),
            HeaderMap::new(),
        )
        .unwrap();
        assert_eq!(http.url("/api/generate"), "http://localhost:11434/api/generate");
    }

    #[test]
    fn rejects_mismatched_provider_and_bad_scheme() {
        let wrong = ProviderHttp::new(
            LlmProvider::OpenAI,
            &cfg(LlmProvider::Ollama, "http://localhost:11434"),
            HeaderMap::new(),
        );
        assert!(wrong.unwrap_err().to_string().contains("invalid provider"));

        let no_scheme = ProviderHttp::new(
            LlmProvider::Ollama,
            &cfg(LlmProvider::Ollama, "localhost:11434"),
            HeaderMap::new(),
        );
        assert!(no_scheme.unwrap_err().to_string().contains("invalid endpoint"));
    }
}
