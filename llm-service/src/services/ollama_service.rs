//! Lightweight Ollama client for embeddings retrieval.
//!
//! Implements a thin client for the local Ollama API:
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval
//!
//! Chat generation is intentionally not exposed here; the chat profile runs
//! against the hosted Gemini service. This client exists so embeddings can be
//! computed locally when a hosted embedding model is not wanted.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{ConfigError, LlmError, Result, make_snippet, validate_http_endpoint};

/// Thin embeddings client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]; reuses an HTTP client with a
/// configurable timeout.
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_embeddings: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::ProviderMismatch`] if `cfg.provider` is not `Ollama`
    /// - [`ConfigError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(ConfigError::ProviderMismatch("expected Ollama").into());
        }

        validate_http_endpoint(&cfg.endpoint)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_embeddings = format!("{}/api/embeddings", base);

        Ok(Self {
            client,
            cfg,
            url_embeddings,
        })
    }

    /// Retrieves embeddings via `/api/embeddings`.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client errors
    /// - [`LlmError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            LlmError::Decode(format!("serde error: {e}; expected `{{ embedding: number[] }}`"))
        })?;

        Ok(out.embedding)
    }
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_provider() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "nomic-embed-text".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(5),
        };
        assert!(OllamaService::new(cfg).is_err());
    }

    #[test]
    fn rejects_empty_endpoint() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "nomic-embed-text".into(),
            endpoint: "  ".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        };
        assert!(OllamaService::new(cfg).is_err());
    }
}
