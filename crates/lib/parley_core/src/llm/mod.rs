//! Text generation — the language model that voices the scripted prompts.
//!
//! # Public API
//!
//! - [`TextGenerator`] — anything that turns a prompt into a reply
//! - [`ollama::OllamaClient`] — the Ollama `/api/generate` implementation
//! - [`config::OllamaConfig`] — endpoint, model, and timeout settings

pub mod config;
pub mod ollama;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while generating text.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {status} {body}")]
    Provider { status: u16, body: String },

    #[error("Provider response parse error: {0}")]
    Parse(String),
}

/// A stateless prompt → reply service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for `prompt`, trimmed of surrounding whitespace.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
