//! Survey request handler.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{SurveyRequest, SurveyResponse};
use crate::services::survey;

/// `POST /survey` — store the answer and open a chat session.
pub async fn submit_survey_handler(
    State(state): State<AppState>,
    Json(body): Json<SurveyRequest>,
) -> AppResult<Json<SurveyResponse>> {
    let row = survey::submit(&state.pool, &body.answer, body.other.as_deref()).await?;
    Ok(Json(SurveyResponse { session_id: row.id }))
}
