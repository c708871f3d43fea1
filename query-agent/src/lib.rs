//! Retrieval-or-fallback query pipeline with a single public entry point.
//!
//! Public API: [`run_agent`] and [`Agent`]. One invocation retrieves top-K
//! context from the wildlife corpus, gates it on substance, composes either a
//! grounded or a fallback prompt for the hosted model, decorates the answer
//! (animal prefix, optional fun fact), appends the exchange to the bounded
//! history log, and returns the final text.
//!
//! The boundary is total: every per-request failure is logged and collapsed
//! into one fixed friendly apology. A single bad request never crashes the
//! serving loop, and internal error text never reaches the end user.

pub mod cfg;
pub mod composer;
pub mod error;
pub mod history;
pub mod personality;
pub mod prompt;
pub mod relevance;
pub mod retriever;

pub use cfg::AgentConfig;
pub use composer::{AnswerModel, ComposeMode, LlmAnswerModel};
pub use error::AgentError;
pub use history::{HistoryEntry, HistoryError, HistoryStore, MAX_HISTORY};
pub use retriever::{FragmentSource, StoreRetriever};

use std::future::Future;
use std::sync::Arc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, error, warn};

use llm_service::LlmService;
use wildlife_store::WildlifeStore;

/// The one user-visible apology every per-request failure collapses into.
pub const FRIENDLY_FAILURE: &str =
    "🦁 Oops — Akoth lost the signal on the savanna! Try asking your question differently. 🌿";

/// The query pipeline with its collaborators wired in.
///
/// Construct once at process start ([`Agent::from_env`] or [`Agent::new`])
/// and reuse for every query. Tests and alternative backends plug in their
/// own seams through [`Agent::with_parts`].
pub struct Agent {
    cfg: AgentConfig,
    retriever: Box<dyn FragmentSource>,
    model: Box<dyn AnswerModel>,
    history: HistoryStore,
}

impl Agent {
    /// Wires the production retriever and model over a shared LLM service.
    pub fn new(cfg: AgentConfig, store: WildlifeStore, svc: Arc<LlmService>) -> Self {
        let retriever = Box::new(StoreRetriever::new(store, svc.clone(), cfg.top_k));
        let model = Box::new(LlmAnswerModel::new(svc));
        let history = HistoryStore::new(&cfg.history_file);
        Self::with_parts(cfg, retriever, model, history)
    }

    /// Assembles an agent from explicit collaborators.
    pub fn with_parts(
        cfg: AgentConfig,
        retriever: Box<dyn FragmentSource>,
        model: Box<dyn AnswerModel>,
        history: HistoryStore,
    ) -> Self {
        Self {
            cfg,
            retriever,
            model,
            history,
        }
    }

    /// Builds the whole pipeline from environment configuration.
    ///
    /// # Errors
    /// Surfaces configuration problems (missing `GEMINI_API_KEY`, malformed
    /// endpoints) so the binary can fail fast at startup instead of
    /// degrading on the first request.
    pub fn from_env() -> Result<Self, AgentError> {
        let svc = Arc::new(LlmService::from_env()?);
        let cfg = AgentConfig::from_env();
        let store = WildlifeStore::new(&cfg.store_config())?;
        Ok(Self::new(cfg, store, svc))
    }

    /// The persisted history log backing this agent.
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Answers one query. Total: never fails past this boundary.
    pub async fn answer(&self, query: &str) -> String {
        let mut rng = StdRng::from_os_rng();
        self.answer_with(query, &mut rng).await
    }

    /// Answers one query with an injected random source, so callers (tests
    /// in particular) can pin the personality decisions.
    pub async fn answer_with<R: Rng>(&self, query: &str, rng: &mut R) -> String {
        let query = query.trim();
        match self.try_answer(query, rng).await {
            Ok(text) => text,
            Err(AgentError::History(err @ HistoryError::Corrupt { .. })) => {
                // Operator problem, not a user problem: call it out loudly.
                error!("history log needs attention: {err}");
                FRIENDLY_FAILURE.to_string()
            }
            Err(err) => {
                warn!("request failed, answering with the friendly fallback: {err}");
                FRIENDLY_FAILURE.to_string()
            }
        }
    }

    /// The fallible pipeline: retrieve, gate, compose, personalize, persist.
    async fn try_answer<R: Rng>(&self, query: &str, rng: &mut R) -> Result<String, AgentError> {
        let fragments = self.bounded(self.retriever.retrieve(query)).await?;

        let mode = if relevance::grounded(&fragments, self.cfg.relevance_min_chars) {
            ComposeMode::Grounded { fragments }
        } else {
            ComposeMode::Fallback {
                intro: personality::quirky_intro(rng),
            }
        };
        debug!(grounded = mode.is_grounded(), "relevance gate evaluated");

        let generated = self
            .bounded(composer::compose(self.model.as_ref(), &mode, query))
            .await?;

        // Prefix sets the tone, the fact is a closing flourish; the order is
        // fixed and never reversed.
        let mut response = String::from(personality::animal_prefix(query));
        response.push_str(&generated);
        let response = personality::append_fun_fact(response, self.cfg.fun_fact_chance, rng);

        self.history.append(query, &response)?;
        Ok(response)
    }

    /// Applies the configured deadline to one external call.
    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, AgentError>>,
    ) -> Result<T, AgentError> {
        match tokio::time::timeout(self.cfg.request_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(AgentError::Timeout(self.cfg.request_timeout)),
        }
    }
}

/// Answers one query with everything built from the environment.
///
/// This is the single contract a surrounding UI or CLI needs: synchronous
/// from the caller's point of view, total (failures become the friendly
/// apology), and side-effecting (history is written on success only).
///
/// Long-lived callers should construct an [`Agent`] once instead of paying
/// the wiring cost per query.
///
/// # Example
/// ```no_run
/// # #[tokio::main] async fn main() {
/// let response = query_agent::run_agent("Tell me about lion prides").await;
/// println!("{response}");
/// # }
/// ```
pub async fn run_agent(query: &str) -> String {
    match Agent::from_env() {
        Ok(agent) => agent.answer(query).await,
        Err(err) => {
            error!("agent construction failed: {err}");
            FRIENDLY_FAILURE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::time::Duration;

    use tempfile::tempdir;
    use wildlife_store::{ContextFragment, StoreError};

    fn test_cfg(dir: &Path) -> AgentConfig {
        AgentConfig {
            top_k: 4,
            relevance_min_chars: 100,
            fun_fact_chance: 0.0,
            request_timeout: Duration::from_secs(5),
            history_file: dir.join("history.jsonl"),
            qdrant_url: "http://127.0.0.1:6334".into(),
            qdrant_api_key: None,
            qdrant_collection: "kenya_wildlife_corpus".into(),
            exact_search: false,
        }
    }

    fn fragment(text: &str) -> ContextFragment {
        ContextFragment {
            score: 0.9,
            text: text.to_string(),
            source: Some("mara_guide.md".to_string()),
        }
    }

    struct CannedRetriever(Vec<ContextFragment>);

    impl FragmentSource for CannedRetriever {
        fn retrieve<'a>(
            &'a self,
            _query: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ContextFragment>, AgentError>> + Send + 'a>>
        {
            Box::pin(async move { Ok(self.0.clone()) })
        }
    }

    struct FailingRetriever;

    impl FragmentSource for FailingRetriever {
        fn retrieve<'a>(
            &'a self,
            _query: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ContextFragment>, AgentError>> + Send + 'a>>
        {
            Box::pin(async move {
                Err(AgentError::Store(StoreError::NotFound(
                    "kenya_wildlife_corpus".to_string(),
                )))
            })
        }
    }

    struct SlowRetriever;

    impl FragmentSource for SlowRetriever {
        fn retrieve<'a>(
            &'a self,
            _query: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ContextFragment>, AgentError>> + Send + 'a>>
        {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            })
        }
    }

    /// Records every prompt it sees and replies with a fixed line.
    struct RecordingModel {
        seen: Arc<Mutex<Vec<String>>>,
        reply: &'static str,
    }

    impl RecordingModel {
        fn new(reply: &'static str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    seen: seen.clone(),
                    reply,
                },
                seen,
            )
        }
    }

    impl AnswerModel for RecordingModel {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
            let prompt = prompt.to_string();
            Box::pin(async move {
                self.seen.lock().expect("lock").push(prompt);
                Ok(self.reply.to_string())
            })
        }
    }

    struct FailingModel;

    impl AnswerModel for FailingModel {
        fn generate<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
            Box::pin(async move { Err(AgentError::Llm(llm_service::LlmError::EmptyCandidates)) })
        }
    }

    fn agent_with(
        cfg: AgentConfig,
        retriever: Box<dyn FragmentSource>,
        model: Box<dyn AnswerModel>,
    ) -> Agent {
        let history = HistoryStore::new(&cfg.history_file);
        Agent::with_parts(cfg, retriever, model, history)
    }

    #[tokio::test]
    async fn failing_retriever_degrades_without_touching_history() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        let history_path = cfg.history_file.clone();
        let (model, _) = RecordingModel::new("unused");
        let agent = agent_with(cfg, Box::new(FailingRetriever), Box::new(model));

        let out = agent.answer("Tell me about lions").await;
        assert_eq!(out, FRIENDLY_FAILURE);
        assert!(!history_path.exists());
    }

    #[tokio::test]
    async fn empty_context_selects_fallback_mode() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        let (model, seen) = RecordingModel::new("General savanna wisdom.");
        let agent = agent_with(cfg, Box::new(CannedRetriever(Vec::new())), Box::new(model));

        let out = agent.answer("What about the weather").await;
        assert_eq!(out, "General savanna wisdom.");

        let prompts = seen.lock().expect("lock");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("**OPENING LINE:**"));
        assert!(!prompts[0].contains("CONTEXT FRAGMENTS"));
        let intro_used = personality::FALLBACK_INTROS
            .iter()
            .any(|intro| prompts[0].contains(intro));
        assert!(intro_used, "fallback prompt must embed a quirky intro");
    }

    #[tokio::test]
    async fn thin_context_also_falls_back() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        let (model, seen) = RecordingModel::new("Short on sources, long on heart.");
        let agent = agent_with(
            cfg,
            Box::new(CannedRetriever(vec![fragment("Lions are cats.")])),
            Box::new(model),
        );

        agent.answer("lions?").await;
        let prompts = seen.lock().expect("lock");
        assert!(!prompts[0].contains("CONTEXT FRAGMENTS"));
    }

    #[tokio::test]
    async fn grounded_run_prefixes_composes_and_persists() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        let history_path = cfg.history_file.clone();
        let long_text = "Lion prides in the Maasai Mara hold territories along the river, \
                         hunting together at dusk and resting through the heat of the day.";
        assert!(long_text.len() > 100);

        let (model, seen) = RecordingModel::new("Prides are family businesses.");
        let agent = agent_with(
            cfg,
            Box::new(CannedRetriever(vec![fragment(long_text)])),
            Box::new(model),
        );

        let out = agent.answer("Tell me about lion prides  ").await;
        assert_eq!(
            out,
            "🦁 Ah, the king of the jungle! Prides are family businesses."
        );

        let prompts = seen.lock().expect("lock");
        assert!(prompts[0].contains("CONTEXT FRAGMENTS"));
        assert!(prompts[0].contains(long_text));

        let entries = HistoryStore::new(&history_path).load().expect("load");
        assert_eq!(
            entries.last().expect("entry"),
            &HistoryEntry {
                question: "Tell me about lion prides".into(),
                answer: out,
            }
        );
    }

    #[tokio::test]
    async fn fun_fact_rides_along_at_chance_one() {
        let dir = tempdir().expect("tempdir");
        let mut cfg = test_cfg(dir.path());
        cfg.fun_fact_chance = 1.0;
        let (model, _) = RecordingModel::new("Zebras are striped.");
        let agent = agent_with(
            cfg,
            Box::new(CannedRetriever(Vec::new())),
            Box::new(model),
        );

        let out = agent.answer("zebra stripes").await;
        assert!(out.starts_with("🦓 The striped wonders of the savanna! Zebras are striped."));
        assert!(out.contains("✨ Fun fact: "));
    }

    #[tokio::test]
    async fn failing_model_degrades_without_touching_history() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        let history_path = cfg.history_file.clone();
        let agent = agent_with(
            cfg,
            Box::new(CannedRetriever(Vec::new())),
            Box::new(FailingModel),
        );

        let out = agent.answer("Tell me about lions").await;
        assert_eq!(out, FRIENDLY_FAILURE);
        assert!(!history_path.exists());
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_retriever_hits_the_deadline() {
        let dir = tempdir().expect("tempdir");
        let mut cfg = test_cfg(dir.path());
        cfg.request_timeout = Duration::from_millis(50);
        let (model, _) = RecordingModel::new("unused");
        let agent = agent_with(cfg, Box::new(SlowRetriever), Box::new(model));

        let out = agent.answer("Tell me about lions").await;
        assert_eq!(out, FRIENDLY_FAILURE);
    }

    #[tokio::test]
    async fn corrupt_history_degrades_after_compose() {
        let dir = tempdir().expect("tempdir");
        let cfg = test_cfg(dir.path());
        std::fs::write(&cfg.history_file, "{broken").expect("seed corrupt log");

        let (model, _) = RecordingModel::new("An answer that never lands.");
        let agent = agent_with(
            cfg,
            Box::new(CannedRetriever(Vec::new())),
            Box::new(model),
        );

        let out = agent.answer("Tell me about lions").await;
        assert_eq!(out, FRIENDLY_FAILURE);
    }
}
