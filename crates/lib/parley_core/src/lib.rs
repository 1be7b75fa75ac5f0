//! # parley_core
//!
//! Core domain logic for Parley: survey and chat persistence, the scripted
//! conversation progression, and the Ollama text-generation client.

pub mod db;
pub mod llm;
pub mod messages;
pub mod migrate;
pub mod script;
pub mod surveys;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
