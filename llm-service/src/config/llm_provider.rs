/// Represents the provider (backend) used for large language model inference.
///
/// Adding more providers later (e.g., Anthropic Claude, Mistral API) is done
/// by extending this enum and the matching service client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini API (hosted, API-key authenticated).
    Gemini,
    /// Local Ollama runtime (used for embeddings).
    Ollama,
}
