//! Chat message persistence.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgExecutor;
use thiserror::Error;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Llm,
}

impl Sender {
    /// Value stored in the `sender` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Llm => "llm",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `sender` column value outside the known set.
#[derive(Debug, Error)]
#[error("unknown message sender: {0}")]
pub struct UnknownSender(pub String);

impl TryFrom<String> for Sender {
    type Error = UnknownSender;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "user" => Ok(Sender::User),
            "llm" => Ok(Sender::Llm),
            _ => Err(UnknownSender(value)),
        }
    }
}

/// Row returned by chat message queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChatMessageRow {
    pub id: i32,
    pub session_id: i32,
    #[sqlx(try_from = "String")]
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Append a message to a session.
pub async fn insert_message<'e, E>(
    executor: E,
    session_id: i32,
    sender: Sender,
    message: &str,
) -> Result<ChatMessageRow, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (session_id, sender, message)
        VALUES ($1, $2, $3)
        RETURNING id, session_id, sender, message, timestamp
        "#,
    )
    .bind(session_id)
    .bind(sender.as_str())
    .bind(message)
    .fetch_one(executor)
    .await
}

/// Get the messages of a session in conversation order.
///
/// Rows written in the same transaction share `now()`, so `id` breaks ties.
pub async fn list_messages<'e, E>(
    executor: E,
    session_id: i32,
) -> Result<Vec<ChatMessageRow>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, ChatMessageRow>(
        r#"
        SELECT id, session_id, sender, message, timestamp
        FROM chat_messages
        WHERE session_id = $1
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(executor)
    .await
}

/// Number of messages in `history` written by the user.
pub fn count_user_messages(history: &[ChatMessageRow]) -> usize {
    history.iter().filter(|m| m.sender == Sender::User).count()
}
