use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo::MediaMessage;

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl From<MediaMessage> for MessageResponse {
    fn from(row: MediaMessage) -> Self {
        Self {
            id: row.id,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
