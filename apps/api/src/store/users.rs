use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{SearchProfile, UserRow};

/// Fetches a user by username, creating one with a default profile on first
/// contact. Concurrent first messages for the same username race on the
/// unique index; the ON CONFLICT upsert makes both callers see one row.
pub async fn get_or_create(pool: &PgPool, username: &str) -> Result<UserRow, sqlx::Error> {
    if let Some(user) = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
    {
        return Ok(user);
    }

    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, username)
        VALUES ($1, $2)
        ON CONFLICT (username) DO UPDATE SET username = EXCLUDED.username
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .fetch_one(pool)
    .await
}

/// Writes the merged search profile back in one statement. All three fields
/// go together; there is no finer-grained merge. Last writer wins.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    profile: &SearchProfile,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET subject = $2, min_level = $3, max_level = $4 WHERE id = $1")
        .bind(user_id)
        .bind(&profile.subject)
        .bind(profile.min_level)
        .bind(profile.max_level)
        .execute(pool)
        .await?;
    Ok(())
}
