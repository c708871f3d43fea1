//! Retrieval helpers: query embedding plus similarity search.

use crate::embed::EmbeddingsProvider;
use crate::errors::StoreError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::ContextFragment;

use tracing::trace;

/// Embeds the query text and returns normalized context fragments.
///
/// The collection is probed first: a missing collection is a terminal
/// `NotFound` for the whole request, never an empty result.
///
/// # Errors
/// Returns embedding/provider errors or Qdrant failures.
pub async fn top_fragments(
    client: &QdrantFacade,
    query: &str,
    top_k: u64,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<ContextFragment>, StoreError> {
    trace!("retrieve::top_fragments top_k={top_k}");

    if !client.collection_exists().await? {
        return Err(StoreError::NotFound(client.collection.clone()));
    }

    let qv = provider.embed(query).await?;
    let hits = client.search(qv, top_k).await?;

    let mut out = Vec::with_capacity(hits.len());
    for (score, payload) in hits {
        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let source = payload
            .get("source")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        out.push(ContextFragment {
            score,
            text,
            source,
        });
    }

    trace!("retrieve::top_fragments hits={}", out.len());
    Ok(out)
}
