//! Answer composition: mode selection output of the relevance gate turned
//! into a prompt and a single model call.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use crate::error::AgentError;
use crate::prompt;
use llm_service::LlmService;
use wildlife_store::ContextFragment;

/// Which prompt the composer builds. The two modes are mutually exclusive:
/// grounded answers carry the full context set, fallback answers carry only
/// a quirky opener.
pub enum ComposeMode {
    Grounded { fragments: Vec<ContextFragment> },
    Fallback { intro: &'static str },
}

impl ComposeMode {
    /// Builds the prompt for this mode.
    pub fn prompt(&self, query: &str) -> String {
        match self {
            ComposeMode::Grounded { fragments } => prompt::grounded(query, fragments),
            ComposeMode::Fallback { intro } => prompt::fallback(query, intro),
        }
    }

    /// True for the grounded branch; used for logging.
    pub fn is_grounded(&self) -> bool {
        matches!(self, ComposeMode::Grounded { .. })
    }
}

/// Text-generation seam. The production implementation calls the hosted chat
/// profile; tests substitute canned or failing models.
pub trait AnswerModel: Send + Sync {
    /// Generates the full answer text for one prompt (no streaming).
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;
}

/// Production model backed by the shared LLM service.
pub struct LlmAnswerModel {
    svc: Arc<LlmService>,
}

impl LlmAnswerModel {
    pub fn new(svc: Arc<LlmService>) -> Self {
        Self { svc }
    }
}

impl AnswerModel for LlmAnswerModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
        Box::pin(async move { self.svc.generate(prompt).await.map_err(AgentError::from) })
    }
}

/// Builds the prompt for `mode` and submits it, returning the model's full
/// text output. External errors propagate unmodified to the orchestrator.
pub async fn compose(
    model: &dyn AnswerModel,
    mode: &ComposeMode,
    query: &str,
) -> Result<String, AgentError> {
    let prompt = mode.prompt(query);
    model.generate(&prompt).await
}
