//! Typed error for the query-agent crate.

use thiserror::Error;

use crate::history::HistoryError;
use llm_service::LlmError;
use wildlife_store::StoreError;

#[derive(Debug, Error)]
pub enum AgentError {
    /// Errors from the underlying retrieval crate, including the missing
    /// collection condition.
    #[error("retrieval error: {0}")]
    Store(#[from] StoreError),

    /// Errors from the hosted model (transport, auth, quota, decode).
    #[error("model error: {0}")]
    Llm(#[from] LlmError),

    /// Errors from the persisted history log.
    #[error(transparent)]
    History(#[from] HistoryError),

    /// An external call exceeded the configured deadline.
    #[error("external call timed out after {0:?}")]
    Timeout(std::time::Duration),
}
