//! Survey response persistence.
//!
//! A survey response is the anchor of a chat session: its `id` is the
//! session id the client sends with every chat message.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgExecutor, PgPool};

use crate::script;

/// Row returned by survey response queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SurveyResponseRow {
    pub id: i32,
    pub answer: String,
    pub other: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SurveyResponseRow {
    /// The news source the conversation is about, taking the free-text
    /// `other` field into account.
    pub fn news_source(&self) -> &str {
        script::resolve_news_source(&self.answer, self.other.as_deref())
    }
}

/// Store a survey answer and return the new row.
pub async fn create_survey_response(
    pool: &PgPool,
    answer: &str,
    other: Option<&str>,
) -> Result<SurveyResponseRow, sqlx::Error> {
    sqlx::query_as::<_, SurveyResponseRow>(
        r#"
        INSERT INTO survey_responses (answer, other)
        VALUES ($1, $2)
        RETURNING id, answer, other, created_at
        "#,
    )
    .bind(answer)
    .bind(other)
    .fetch_one(pool)
    .await
}

/// Get a survey response by id, or `None` if the session does not exist.
pub async fn get_survey_response<'e, E>(
    executor: E,
    id: i32,
) -> Result<Option<SurveyResponseRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, SurveyResponseRow>(
        r#"
        SELECT id, answer, other, created_at
        FROM survey_responses
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(answer: &str, other: Option<&str>) -> SurveyResponseRow {
        SurveyResponseRow {
            id: 1,
            answer: answer.into(),
            other: other.map(Into::into),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn news_source_uses_answer_for_listed_sources() {
        assert_eq!(row("CNN", None).news_source(), "CNN");
        assert_eq!(row("FOX", Some("ignored")).news_source(), "FOX");
    }

    #[test]
    fn news_source_uses_other_text_when_answer_is_other() {
        assert_eq!(row("Other", Some("BBC")).news_source(), "BBC");
    }
}
