//! Retrieval facade over the Qdrant wildlife corpus.
//!
//! This crate provides a clean API to fetch top-K context fragments for a
//! textual query. Ingestion of the corpus happens out-of-band; at runtime the
//! store only reads. The design is flat and splits responsibilities into
//! focused modules.

mod config;
pub mod embed;
mod errors;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::StoreConfig;
pub use embed::EmbeddingsProvider;
pub use errors::StoreError;
pub use record::ContextFragment;

use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct WildlifeStore {
    client: qdrant_facade::QdrantFacade,
}

impl WildlifeStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Config` if the client initialization fails.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        trace!("WildlifeStore::new collection={}", cfg.collection);
        let client = qdrant_facade::QdrantFacade::new(cfg)?;
        Ok(Self { client })
    }

    /// Name of the target collection.
    pub fn collection(&self) -> &str {
        &self.client.collection
    }

    /// Reports whether the configured collection is reachable and present.
    ///
    /// Probe failures count as "not ready"; this is a status display helper,
    /// not an error path.
    pub async fn is_ready(&self) -> bool {
        self.client.collection_exists().await.unwrap_or(false)
    }

    /// Fetches up to `top_k` context fragments for a textual query using the
    /// provided embedding provider.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` when the collection is missing,
    /// embedding errors, or Qdrant failures.
    pub async fn top_fragments(
        &self,
        query: &str,
        top_k: u64,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Vec<ContextFragment>, StoreError> {
        trace!("WildlifeStore::top_fragments top_k={top_k}");
        retrieve::top_fragments(&self.client, query, top_k, provider).await
    }
}
