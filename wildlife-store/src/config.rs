//! Runtime and collection configuration.

use crate::errors::StoreError;

/// Configuration for retrieval against the wildlife corpus.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Qdrant endpoint, e.g. `http://127.0.0.1:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl StoreConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            exact_search: false,
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(StoreError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(StoreError::Config("collection is empty".into()));
        }
        Ok(())
    }
}
