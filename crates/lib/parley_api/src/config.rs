//! API server configuration.

use parley_core::llm::config::OllamaConfig;

/// Default listen address, matching the port the web client expects.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Default PostgreSQL connection URL.
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/survey_db";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Text-generation backend.
    pub ollama: OllamaConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable       | Default                                          |
    /// |----------------|--------------------------------------------------|
    /// | `BIND_ADDR`    | `127.0.0.1:8000`                                 |
    /// | `DATABASE_URL` | `postgres://postgres@localhost:5432/survey_db`   |
    /// | `OLLAMA_*`     | see [`OllamaConfig::from_env`]                   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            ollama: OllamaConfig::from_lookup(&lookup),
        }
    }
}
