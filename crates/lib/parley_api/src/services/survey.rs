//! Survey submission.

use parley_core::surveys::{self, SurveyResponseRow};
use sqlx::PgPool;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Validate and store a survey answer.
///
/// A blank `other` is stored as `NULL`.
pub async fn submit(
    pool: &PgPool,
    answer: &str,
    other: Option<&str>,
) -> AppResult<SurveyResponseRow> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Err(AppError::Validation("answer must not be empty".into()));
    }
    let other = other.map(str::trim).filter(|o| !o.is_empty());

    let row = surveys::create_survey_response(pool, answer, other).await?;
    info!(session_id = row.id, answer = %row.answer, other = ?row.other, "survey response stored");
    Ok(row)
}
