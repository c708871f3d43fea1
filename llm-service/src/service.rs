//! Shared LLM service with two active profiles: **chat** and **embedding**.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Clients are built eagerly so a bad credential or endpoint fails at
//!   startup, not on the first user request.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::LlmService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmError> {
//!     let svc = Arc::new(LlmService::from_env()?);
//!
//!     let txt = svc.generate("Why do zebras have stripes?").await?;
//!     println!("CHAT: {}", txt);
//!
//!     let emb = svc.embed("zebra").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     Ok(())
//! }
//! ```

use crate::config::default_config::{config_embedding, config_gemini_chat};
use crate::config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
use crate::error_handler::{ConfigError, Result};
use crate::services::{gemini_service::GeminiService, ollama_service::OllamaService};

/// Shared service managing the **chat** and **embedding** profiles.
///
/// The chat profile is always Gemini; the embedding profile dispatches to
/// Gemini or Ollama depending on its configured provider.
pub struct LlmService {
    chat: GeminiService,
    chat_cfg: LlmModelConfig,
    embedding: EmbeddingBackend,
}

enum EmbeddingBackend {
    Gemini(GeminiService),
    Ollama(OllamaService),
}

impl LlmService {
    /// Creates the service from two explicit profile configs.
    ///
    /// # Errors
    /// Returns a configuration error when the chat profile is not Gemini, a
    /// credential is missing, or an endpoint is malformed.
    pub fn new(chat: LlmModelConfig, embedding: LlmModelConfig) -> Result<Self> {
        if chat.provider != LlmProvider::Gemini {
            return Err(ConfigError::ProviderMismatch("chat profile must be Gemini").into());
        }
        let chat_cfg = chat.clone();
        let chat = GeminiService::new(chat)?;

        let embedding = match embedding.provider {
            LlmProvider::Gemini => EmbeddingBackend::Gemini(GeminiService::new(embedding)?),
            LlmProvider::Ollama => EmbeddingBackend::Ollama(OllamaService::new(embedding)?),
        };

        Ok(Self {
            chat,
            chat_cfg,
            embedding,
        })
    }

    /// Creates the service from environment-driven defaults.
    ///
    /// # Errors
    /// Propagates missing/invalid environment configuration, e.g. an absent
    /// `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Self::new(config_gemini_chat()?, config_embedding()?)
    }

    /// Generates text using the **chat** profile (non-streaming).
    ///
    /// # Errors
    /// Returns [`crate::LlmError`] on transport, status, or decode failures.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat.generate(prompt).await
    }

    /// Computes an embedding vector using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`crate::LlmError`] if the provider call fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        match &self.embedding {
            EmbeddingBackend::Gemini(cli) => cli.embeddings(input).await,
            EmbeddingBackend::Ollama(cli) => cli.embeddings(input).await,
        }
    }

    /// Model name of the chat profile, for status displays.
    pub fn chat_model(&self) -> &str {
        &self.chat_cfg.model
    }
}
