//! The chat exchange.
//!
//! One exchange runs in a single transaction: record the user message,
//! derive the script stage from the stored history, ask the model, record
//! its reply. Any failure rolls the whole exchange back.

use parley_core::llm::TextGenerator;
use parley_core::messages::{self, ChatMessageRow, Sender};
use parley_core::script::{self, Stage};
use parley_core::surveys::{self, SurveyResponseRow};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// Outcome of a successful exchange.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub stage: Stage,
}

/// Run one chat exchange for `session_id`.
pub async fn respond(
    pool: &PgPool,
    generator: &dyn TextGenerator,
    session_id: i32,
    message: &str,
) -> AppResult<ChatReply> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message must not be empty".into()));
    }

    let mut tx = pool.begin().await.map_err(AppError::server)?;

    match exchange(&mut *tx, generator, session_id, message).await {
        Ok(reply) => {
            tx.commit().await.map_err(AppError::server)?;
            Ok(reply)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                warn!(session_id, "rollback failed: {rollback}");
            }
            Err(e)
        }
    }
}

async fn exchange(
    conn: &mut PgConnection,
    generator: &dyn TextGenerator,
    session_id: i32,
    message: &str,
) -> AppResult<ChatReply> {
    info!(session_id, message, "chat message received");

    let survey = surveys::get_survey_response(&mut *conn, session_id)
        .await
        .map_err(AppError::server)?
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;

    messages::insert_message(&mut *conn, session_id, Sender::User, message)
        .await
        .map_err(AppError::server)?;

    let history = messages::list_messages(&mut *conn, session_id)
        .await
        .map_err(AppError::server)?;
    let stage = Stage::for_user_turn(messages::count_user_messages(&history));
    debug!(session_id, ?stage, turns = history.len(), "script stage selected");

    let prompt = script::build_prompt(stage, survey.news_source(), message);
    let reply = match generator.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(session_id, "error generating response: {e}");
            script::FALLBACK_REPLY.to_string()
        }
    };

    messages::insert_message(&mut *conn, session_id, Sender::Llm, &reply)
        .await
        .map_err(AppError::server)?;

    Ok(ChatReply { reply, stage })
}

/// Load a session and its messages in conversation order.
pub async fn transcript(
    pool: &PgPool,
    session_id: i32,
) -> AppResult<(SurveyResponseRow, Vec<ChatMessageRow>)> {
    let survey = surveys::get_survey_response(pool, session_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Session not found".into()))?;
    let history = messages::list_messages(pool, session_id).await?;
    Ok((survey, history))
}
