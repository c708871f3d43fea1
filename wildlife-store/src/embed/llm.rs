//! Embeddings provider backed by the shared `llm-service` profiles.

use std::sync::Arc;

use crate::{EmbeddingsProvider, StoreError};
use llm_service::LlmService;

/// Embedding provider delegating to the service's embedding profile.
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmService>,
}

impl LlmEmbedder {
    /// Construct a new embedder over a shared service handle.
    pub fn new(svc: Arc<LlmService>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.svc
                .embed(text)
                .await
                .map_err(|e| StoreError::Embedding(e.to_string()))
        })
    }
}
