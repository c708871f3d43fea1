//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for wildlife-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The configured collection does not exist in the vector index.
    ///
    /// Terminal for the request; fixed out-of-band by (re)ingesting the
    /// corpus.
    #[error("collection '{0}' not found in vector index")]
    NotFound(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Failure while computing the query embedding.
    #[error("embedding error: {0}")]
    Embedding(String),
}
