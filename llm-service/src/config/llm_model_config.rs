use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM model invocation profile.
///
/// This struct contains both general and provider-specific parameters and is
/// shared by the chat and embedding profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend (e.g., Gemini, Ollama).
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gemini-2.5-flash"`).
    pub model: String,

    /// Inference endpoint (remote API URL or local server URL).
    pub endpoint: String,

    /// Optional API key for authentication (required by Gemini).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
