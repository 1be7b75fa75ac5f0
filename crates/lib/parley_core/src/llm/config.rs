//! Ollama client configuration.

use std::env;
use std::time::Duration;

/// Default Ollama API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model used for the scripted conversation.
pub const DEFAULT_MODEL: &str = "qwen:0.5b";

/// Default per-request timeout. Small local models can be slow on first load.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved configuration for the Ollama client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Ollama API base URL (without the `/api/...` path).
    pub base_url: String,
    /// Model name passed to `/api/generate`.
    pub model: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OllamaConfig {
    /// Reads configuration from environment variables with defaults.
    ///
    /// | Variable              | Default                  |
    /// |-----------------------|--------------------------|
    /// | `OLLAMA_BASE_URL`     | `http://localhost:11434` |
    /// | `OLLAMA_MODEL`        | `qwen:0.5b`              |
    /// | `OLLAMA_TIMEOUT_SECS` | `120`                    |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`OllamaConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout = lookup("OLLAMA_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            base_url: lookup("OLLAMA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        }
    }

    /// Full URL of the non-streaming generate endpoint.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}
