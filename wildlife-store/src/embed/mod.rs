use crate::errors::StoreError;
use std::{future::Future, pin::Pin};

/// Provider interface for query embedding.
///
/// Async because real providers (Gemini, Ollama) perform HTTP requests.
/// Implement this trait to plug in a different embedding backend.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one text into a query vector.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>;
}

pub mod llm;
