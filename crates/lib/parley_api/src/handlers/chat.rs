//! Chat request handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::error::AppResult;
use crate::models::{ChatRequest, ChatResponse, TranscriptResponse};
use crate::services::chat;

/// `POST /chat` — send the next user message and get the model's reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let reply = chat::respond(
        &state.pool,
        state.generator.as_ref(),
        body.session_id,
        &body.message,
    )
    .await?;
    Ok(Json(ChatResponse {
        response: reply.reply,
        complete: reply.stage.is_final(),
    }))
}

/// `GET /chat/{session_id}/messages` — the survey answer and full transcript.
pub async fn transcript_handler(
    State(state): State<AppState>,
    Path(session_id): Path<i32>,
) -> AppResult<Json<TranscriptResponse>> {
    let (survey, history) = chat::transcript(&state.pool, session_id).await?;
    Ok(Json(TranscriptResponse {
        session_id: survey.id,
        answer: survey.answer,
        other: survey.other,
        messages: history.into_iter().map(Into::into).collect(),
    }))
}
