//! Retrieval seam between the agent and the vector store.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use tracing::debug;

use crate::error::AgentError;
use llm_service::LlmService;
use wildlife_store::{ContextFragment, WildlifeStore, embed::llm::LlmEmbedder};

/// Source of context fragments for a query.
///
/// The production implementation embeds the query and searches Qdrant; tests
/// substitute canned or failing sources.
pub trait FragmentSource: Send + Sync {
    /// Fetches the ranked context set for one query.
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ContextFragment>, AgentError>> + Send + 'a>>;
}

/// Store-backed retriever: embeds via the shared LLM service, searches the
/// wildlife corpus, returns up to `top_k` fragments.
pub struct StoreRetriever {
    store: WildlifeStore,
    embedder: LlmEmbedder,
    top_k: u64,
}

impl StoreRetriever {
    /// Wires the store and the embedding profile together.
    pub fn new(store: WildlifeStore, svc: Arc<LlmService>, top_k: u64) -> Self {
        Self {
            store,
            embedder: LlmEmbedder::new(svc),
            top_k,
        }
    }
}

impl FragmentSource for StoreRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ContextFragment>, AgentError>> + Send + 'a>> {
        Box::pin(async move {
            let fragments = self
                .store
                .top_fragments(query, self.top_k, &self.embedder)
                .await?;
            debug!(hits = fragments.len(), "retrieved context fragments");
            Ok(fragments)
        })
    }
}
