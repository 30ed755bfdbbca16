use sqlx::PgPool;
use uuid::Uuid;

use crate::models::message::ChatMessageRow;

/// Appends one conversation turn. Append-only; rows are never updated.
pub async fn append(
    pool: &PgPool,
    user_id: Uuid,
    role: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO chat_messages (id, user_id, role, content) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(role)
        .bind(content)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the most recent `limit` turns in chronological order
/// (oldest -> newest). Fetched newest-first and reversed.
pub async fn recent(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ChatMessageRow>, sqlx::Error> {
    let mut rows = sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.reverse();
    Ok(rows)
}
