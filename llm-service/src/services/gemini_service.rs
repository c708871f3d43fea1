//! Gemini service for text generation and embeddings.
//!
//! Minimal, non-streaming client around the Google Generative Language REST
//! API. Endpoints are derived from `LlmModelConfig::endpoint`:
//! - `POST {endpoint}/v1beta/models/{model}:generateContent` — text generation
//! - `POST {endpoint}/v1beta/models/{model}:embedContent`    — embeddings
//!
//! Constructor validation:
//! - `cfg.provider` must be [`LlmProvider::Gemini`]
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized through the unified types in `error_handler`.

use std::time::Duration;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{ConfigError, LlmError, Result, make_snippet, validate_http_endpoint};

/// Thin client for the Gemini API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` with the API-key header and a timeout.
///
/// High-level operations:
/// - [`GeminiService::generate`]   — single, non-streaming content generation
/// - [`GeminiService::embeddings`] — single embeddings vector retrieval
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embeddings: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::ProviderMismatch`] if `cfg.provider` is not Gemini
    /// - [`ConfigError::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`ConfigError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Gemini {
            return Err(ConfigError::ProviderMismatch("expected Gemini").into());
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey("Gemini"))?;

        validate_http_endpoint(&cfg.endpoint)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(&api_key)
                .map_err(|e| LlmError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = cfg.endpoint.trim().trim_end_matches('/').to_string();
        let url_generate = format!("{}/v1beta/models/{}:generateContent", base, cfg.model);
        let url_embeddings = format!("{}/v1beta/models/{}:embedContent", base, cfg.model);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** generation request (`:generateContent`).
    ///
    /// Mapped options from config: `temperature`, `top_p`, `max_tokens`.
    /// The full prompt travels as a single user part; system steering is
    /// expected to be baked into the prompt by the caller.
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Decode`] if the JSON cannot be parsed
    /// - [`LlmError::EmptyCandidates`] if no candidates are returned
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt);

        debug!(prompt_len = prompt.len(), "POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, "generation request failed");
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("serde error: {e}")))?;

        let text = out.text();
        if text.is_empty() {
            return Err(LlmError::EmptyCandidates);
        }
        Ok(text)
    }

    /// Retrieves an embedding vector (`:embedContent`).
    ///
    /// # Errors
    /// - [`LlmError::HttpStatus`] for non-2xx responses
    /// - [`LlmError::HttpTransport`] for client/network failures
    /// - [`LlmError::Decode`] if the JSON cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbedRequest::new(input);

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
            let snippet = make_snippet(&text);
            return Err(LlmError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(format!("serde error: {e}")))?;

        Ok(out.embedding.values)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `:generateContent` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(
        rename = "generationConfig",
        skip_serializing_if = "Option::is_none"
    )]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Subset of the Gemini `generationConfig` object.
#[derive(Debug, Default, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "topP", skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a request from config and prompt.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        let generation_config = GenerationConfig {
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_output_tokens: cfg.max_tokens,
        };

        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: Some(generation_config),
        }
    }
}

/// Response body for `:generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> String {
        let Some(first) = self.candidates.first() else {
            return String::new();
        };
        let Some(content) = &first.content else {
            return String::new();
        };
        content.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    content: EmbedContent<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedContent<'a> {
    parts: Vec<Part<'a>>,
}

impl<'a> EmbedRequest<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            content: EmbedContent {
                parts: vec![Part { text: input }],
            },
        }
    }
}

/// Response body for `:embedContent`.
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: Some("test-key".into()),
            max_tokens: None,
            temperature: Some(0.7),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn rejects_missing_api_key() {
        let cfg = LlmModelConfig {
            api_key: None,
            ..cfg()
        };
        assert!(GeminiService::new(cfg).is_err());
    }

    #[test]
    fn rejects_bad_endpoint() {
        let cfg = LlmModelConfig {
            endpoint: "generativelanguage.googleapis.com".into(),
            ..cfg()
        };
        assert!(GeminiService::new(cfg).is_err());
    }

    #[test]
    fn rejects_wrong_provider() {
        let cfg = LlmModelConfig {
            provider: LlmProvider::Ollama,
            ..cfg()
        };
        assert!(GeminiService::new(cfg).is_err());
    }

    #[test]
    fn builds_versioned_urls() {
        let svc = GeminiService::new(cfg()).expect("service");
        assert!(
            svc.url_generate
                .ends_with("/v1beta/models/gemini-2.5-flash:generateContent")
        );
        assert!(
            svc.url_embeddings
                .ends_with("/v1beta/models/gemini-2.5-flash:embedContent")
        );
    }

    #[test]
    fn parses_generate_response() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Lions "}, {"text": "sleep a lot."}]}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(resp.text(), "Lions sleep a lot.");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let resp: GenerateResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn parses_embed_response() {
        let raw = r#"{"embedding": {"values": [0.1, -0.2, 0.3]}}"#;
        let resp: EmbedResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(resp.embedding.values.len(), 3);
    }
}
