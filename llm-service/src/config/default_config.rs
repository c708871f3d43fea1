//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], grouped by role:
//!
//! - **Chat**      → hosted Gemini model composing the final answers
//! - **Embedding** → Gemini or local Ollama embedding generator
//!
//! # Environment variables
//!
//! Chat (Gemini):
//! - `GEMINI_API_KEY`  = API credential (mandatory)
//! - `GEMINI_MODEL`    = model name (default `gemini-2.5-flash`)
//! - `GEMINI_ENDPOINT` = API base URL (default `https://generativelanguage.googleapis.com`)
//! - `LLM_MAX_TOKENS`  = optional max tokens (u32)
//!
//! Embedding:
//! - `EMBEDDING_PROVIDER` = `gemini` (default) or `ollama`
//! - `EMBEDDING_MODEL`    = embedding model (default `text-embedding-004` for
//!   Gemini; mandatory for Ollama)
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory for Ollama)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmError, env_opt_u32, must_env},
};

const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_EMBEDDING_MODEL: &str = "text-embedding-004";

fn env_or(name: &str, dflt: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if both are missing
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn ollama_endpoint() -> Result<String, LlmError> {
    if let Ok(url) = std::env::var("OLLAMA_URL") {
        if !url.trim().is_empty() {
            return Ok(url);
        }
    }
    if let Ok(port) = std::env::var("OLLAMA_PORT") {
        if !port.trim().is_empty() {
            let _ = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    var: "OLLAMA_PORT",
                    reason: "expected u16 (1..=65535)",
                })?;
            return Ok(format!("http://localhost:{port}"));
        }
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}

/// Constructs the config for the **chat** profile (hosted Gemini).
///
/// A missing `GEMINI_API_KEY` is a startup configuration error, by contract
/// surfaced before the first request is served.
///
/// # Defaults
/// - `temperature = Some(0.7)`
/// - `timeout_secs = Some(60)`
pub fn config_gemini_chat() -> Result<LlmModelConfig, LlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        endpoint: env_or("GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT),
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(60),
    })
}

/// Constructs the config for the **embedding** profile.
///
/// Provider selection via `EMBEDDING_PROVIDER`; defaults to hosted Gemini so
/// a single credential is enough to run the whole pipeline.
///
/// # Defaults
/// - `temperature = None` (embeddings are deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, LlmError> {
    let provider = env_or("EMBEDDING_PROVIDER", "gemini").to_lowercase();
    match provider.as_str() {
        "gemini" => {
            let api_key = must_env("GEMINI_API_KEY")?;
            Ok(LlmModelConfig {
                provider: LlmProvider::Gemini,
                model: env_or("EMBEDDING_MODEL", DEFAULT_GEMINI_EMBEDDING_MODEL),
                endpoint: env_or("GEMINI_ENDPOINT", DEFAULT_GEMINI_ENDPOINT),
                api_key: Some(api_key),
                max_tokens: None,
                temperature: None,
                top_p: None,
                timeout_secs: Some(30),
            })
        }
        "ollama" => {
            let endpoint = ollama_endpoint()?;
            let model = must_env("EMBEDDING_MODEL")?;
            Ok(LlmModelConfig {
                provider: LlmProvider::Ollama,
                model,
                endpoint,
                api_key: None,
                max_tokens: None,
                temperature: None,
                top_p: None,
                timeout_secs: Some(30),
            })
        }
        other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
    }
}
