//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! This facade concentrates all Qdrant interactions behind a minimal API,
//! hiding the verbose builder pattern and keeping the rest of the
//! application decoupled from `qdrant-client`.

use crate::config::StoreConfig;
use crate::errors::StoreError;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{SearchParamsBuilder, SearchPointsBuilder, Value as QValue};
use tracing::{debug, trace};

/// A facade over the Qdrant client.
///
/// Encapsulates the underlying client, the target collection name, and the
/// exact-search flag.
pub struct QdrantFacade {
    client: Qdrant,
    pub(crate) collection: String,
    exact: bool,
}

impl QdrantFacade {
    /// Creates a new facade from the given configuration.
    ///
    /// Supports optional API key authentication for Qdrant Cloud.
    ///
    /// # Errors
    /// Returns `StoreError::Config` on invalid config and
    /// `StoreError::Qdrant` when the client cannot be built.
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.qdrant_url);
        if let Some(key) = &cfg.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            exact: cfg.exact_search,
        })
    }

    /// Checks whether the target collection exists.
    ///
    /// # Errors
    /// Returns `StoreError::Qdrant` if the probe itself fails (endpoint
    /// unreachable, auth failure).
    pub async fn collection_exists(&self) -> Result<bool, StoreError> {
        trace!("collection_exists '{}'", self.collection);
        self.client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))
    }

    /// Performs a similarity search in the target collection.
    ///
    /// Returns `(score, payload)` tuples with results sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
    ) -> Result<Vec<(f32, serde_json::Value)>, StoreError> {
        debug!(
            "searching '{}' with top_k={} exact={}",
            self.collection, top_k, self.exact
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(true);
        if self.exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| StoreError::Qdrant(e.to_string()))?;

        let mut out = Vec::with_capacity(res.result.len());
        for r in res.result.into_iter() {
            let score = r.score;
            let payload_json = qpayload_to_json(r.payload);
            out.push((score, payload_json));
        }

        debug!("search completed: {} hits returned", out.len());
        Ok(out)
    }
}

/// Converts a Qdrant payload (`HashMap<String, qdrant::Value>`) into JSON.
///
/// Unsupported nested objects/arrays are mapped to `Null`.
fn qpayload_to_json(mut p: std::collections::HashMap<String, QValue>) -> serde_json::Value {
    use qdrant_client::qdrant::value::Kind as K;
    let mut m = serde_json::Map::new();
    for (k, v) in p.drain() {
        let j = match v.kind {
            Some(K::StringValue(s)) => serde_json::Value::String(s),
            Some(K::IntegerValue(i)) => serde_json::Value::Number(i.into()),
            Some(K::DoubleValue(f)) => serde_json::json!(f),
            Some(K::BoolValue(b)) => serde_json::Value::Bool(b),
            None => serde_json::Value::Null,
            // Nested structs and lists are not part of the corpus payload.
            _ => serde_json::Value::Null,
        };
        m.insert(k, j);
    }
    serde_json::Value::Object(m)
}
