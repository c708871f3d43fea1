//! Core data models used by the library.

use serde::Serialize;

/// A single retrieval hit: one opaque text chunk from the corpus.
///
/// Zero or more fragments form the context set for one query. The payload is
/// whatever the ingestion pipeline stored; only `text` is required.
#[derive(Clone, Debug, Serialize)]
pub struct ContextFragment {
    /// Similarity score assigned by the vector index.
    pub score: f32,
    /// Textual payload of the chunk.
    pub text: String,
    /// Optional provenance label (document or section name).
    pub source: Option<String>,
}
