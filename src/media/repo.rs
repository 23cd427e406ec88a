use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct MediaMessage {
    pub id: Uuid,
    pub message: String,
    pub created_at: OffsetDateTime,
}

pub async fn insert(db: &PgPool, message: &str) -> anyhow::Result<MediaMessage> {
    let row = sqlx::query_as::<_, MediaMessage>(
        r#"
        INSERT INTO media_messages (message)
        VALUES ($1)
        RETURNING id, message, created_at
        "#,
    )
    .bind(message)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list(db: &PgPool, limit: i64) -> anyhow::Result<Vec<MediaMessage>> {
    let rows = sqlx::query_as::<_, MediaMessage>(
        r#"
        SELECT id, message, created_at
        FROM media_messages
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
