//! Unified error handling for `llm-service`.
//!
//! A single top-level [`LlmError`] covers the whole crate, with configuration
//! problems grouped in [`ConfigError`]. Small helpers for reading/validating
//! environment variables return the unified [`Result<T>`] alias.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration/validation errors (startup time).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying HTTP transport error (includes client-side timeouts).
    #[error("[llm-service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[llm-service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response shape.
    #[error("[llm-service] failed to decode response: {0}")]
    Decode(String),

    /// The model returned an empty candidate list.
    #[error("[llm-service] model returned no candidates")]
    EmptyCandidates,
}

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[llm-service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, limits, timeouts).
    #[error("[llm-service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider name.
    #[error("[llm-service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Endpoint was empty or did not use an http/https scheme.
    #[error("[llm-service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The provider requires an API key and none was supplied.
    #[error("[llm-service] missing API key for provider {0}")]
    MissingApiKey(&'static str),

    /// The configured provider does not support the requested role.
    #[error("[llm-service] provider mismatch: {0}")]
    ProviderMismatch(&'static str),
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that an endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidEndpoint`] otherwise.
pub fn validate_http_endpoint(value: &str) -> Result<()> {
    let value = value.trim();
    if !value.is_empty() && (value.starts_with("http://") || value.starts_with("https://")) {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint(value.to_string()).into())
    }
}

/// Trims a response body down to a log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    text.chars().take(240).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_validation() {
        assert!(validate_http_endpoint("http://localhost:11434").is_ok());
        assert!(validate_http_endpoint("https://generativelanguage.googleapis.com").is_ok());
        assert!(validate_http_endpoint("").is_err());
        assert!(validate_http_endpoint("localhost:11434").is_err());
        assert!(validate_http_endpoint("ftp://x").is_err());
    }

    #[test]
    fn snippet_is_bounded() {
        let long = "x".repeat(1000);
        assert_eq!(make_snippet(&long).len(), 240);
        assert_eq!(make_snippet("short"), "short");
    }
}
