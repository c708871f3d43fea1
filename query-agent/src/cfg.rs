//! Runtime configuration loaded from environment variables.
//!
//! The agent never reads globals at request time: this bag is built once at
//! process start and handed to the constructors that need it.

use std::path::PathBuf;
use std::time::Duration;

use wildlife_store::StoreConfig;

/// Config bag for the agent. All fields have defaults via `from_env`.
///
/// The retrieval and personality knobs carry product-chosen defaults
/// (`top_k = 4`, `relevance_min_chars = 100`, `fun_fact_chance = 0.3`);
/// they are tunable through the environment but the defaults should not be
/// changed without product guidance.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Maximum number of fragments fetched per query.
    pub top_k: u64,
    /// Joined-text length above which retrieved context counts as grounding.
    pub relevance_min_chars: usize,
    /// Probability of appending a trivia line to a finished answer.
    pub fun_fact_chance: f64,
    /// Deadline applied to each external call (retrieval, generation).
    pub request_timeout: Duration,
    /// Location of the persisted question/answer log.
    pub history_file: PathBuf,

    // Vector store connection
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub qdrant_collection: String,
    pub exact_search: bool,
}

impl AgentConfig {
    /// Build from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            top_k: parse("RAG_TOP_K", 4u64),
            relevance_min_chars: parse("RELEVANCE_MIN_CHARS", 100usize),
            fun_fact_chance: parse("FUN_FACT_CHANCE", 0.3f64),
            request_timeout: Duration::from_secs(parse("REQUEST_TIMEOUT_SECS", 60u64)),
            history_file: PathBuf::from(env("HISTORY_FILE", "chat_history.jsonl")),

            qdrant_url: env("QDRANT_URL", "http://127.0.0.1:6334"),
            qdrant_api_key: std::env::var("QDRANT_API_KEY").ok(),
            qdrant_collection: env("QDRANT_COLLECTION", "kenya_wildlife_corpus"),
            exact_search: env("RAG_EXACT_SEARCH", "false") == "true",
        }
    }

    /// Convert to a `wildlife_store::StoreConfig` used by the store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            qdrant_url: self.qdrant_url.clone(),
            qdrant_api_key: self.qdrant_api_key.clone(),
            collection: self.qdrant_collection.clone(),
            exact_search: self.exact_search,
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k).unwrap_or_else(|_| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(dflt)
}
