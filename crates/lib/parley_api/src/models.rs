//! Request and response bodies.
//!
//! Field names are snake_case on the wire, as the web client sends them.

use chrono::{DateTime, Utc};
use parley_core::messages::{ChatMessageRow, Sender};
use serde::{Deserialize, Serialize};

/// `POST /survey` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRequest {
    pub answer: String,
    #[serde(default)]
    pub other: Option<String>,
}

/// `POST /survey` response.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResponse {
    pub session_id: i32,
}

/// `POST /chat` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: i32,
    pub message: String,
}

/// `POST /chat` response.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    /// True once the script has reached its closing turn.
    pub complete: bool,
}

/// One entry of a session transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMessage {
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessageRow> for TranscriptMessage {
    fn from(row: ChatMessageRow) -> Self {
        Self {
            sender: row.sender,
            message: row.message,
            timestamp: row.timestamp,
        }
    }
}

/// `GET /chat/{session_id}/messages` response.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptResponse {
    pub session_id: i32,
    pub answer: String,
    pub other: Option<String>,
    pub messages: Vec<TranscriptMessage>,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}
