use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};

use crate::auth::services::AuthUser;
use crate::coach::client::{ChatRole, ChatTurn, CoachError};
use crate::coach::prompt;
use crate::metrics::Profile;
use crate::profile::repo as profile_repo;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/coach/chat", post(chat))
}

#[instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let message = payload.message.trim();
    if message.is_empty() {
        warn!("empty coach message");
        return Err((StatusCode::BAD_REQUEST, "message is required".into()));
    }

    let profile = profile_repo::find_by_user(&state.db, user_id)
        .await
        .map_err(internal)?
        .map(|row| row.to_metrics())
        .unwrap_or_else(Profile::default);

    let mut turns = Vec::with_capacity(payload.history.len() + 1);
    for turn in &payload.history {
        let role = match turn.role.as_str() {
            "user" => ChatRole::User,
            // the web client stores its own turns as "assistant"
            "model" | "assistant" => ChatRole::Model,
            other => {
                warn!(role = %other, "unknown chat role");
                return Err((StatusCode::BAD_REQUEST, format!("unknown chat role: {other}")));
            }
        };
        turns.push(ChatTurn {
            role,
            text: turn.content.clone(),
        });
    }
    turns.push(ChatTurn {
        role: ChatRole::User,
        text: prompt::question(&prompt::fitness_context(&profile), message),
    });

    match state.coach.chat(&turns).await {
        Ok(reply) => Ok(Json(ChatResponse { message: reply })),
        Err(CoachError::NotConfigured) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "AI coach is not configured".into(),
        )),
        Err(e) => {
            error!(error = %e, %user_id, "coach chat failed");
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
